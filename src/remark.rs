//! Coach remark for the results card
//!
//! One best-effort request to a text-generation service. The public entry
//! point never fails: a missing key, a transport error, a bad status or an
//! unreadable body all turn into a fixed line so the results card can render.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::settings::RemarkSettings;
use crate::sim::RoundSummary;

/// Shown when no API key is configured
pub const FALLBACK_NO_KEY: &str = "Gut gespielt! (API Key nicht konfiguriert)";
/// Shown when the request fails for any reason
pub const FALLBACK_ERROR: &str = "Starke Leistung!";
/// Shown when the service answers with no text
pub const FALLBACK_EMPTY: &str = "Das war ein Spiel!";

/// Ask the coach for a one-line verdict on a round of `round_seconds`
pub async fn coach_comment(settings: &RemarkSettings, summary: RoundSummary, round_seconds: u32) -> String {
    let Some(key) = settings.key() else {
        log::warn!("Coach API key is missing. Returning fallback comment.");
        return FALLBACK_NO_KEY.to_string();
    };

    match request_comment(settings, key, summary, round_seconds).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            log::warn!("Coach returned an empty comment");
            FALLBACK_EMPTY.to_string()
        }
        Err(e) => {
            log::error!("Coach remark failed: {:#}", e);
            FALLBACK_ERROR.to_string()
        }
    }
}

/// Prompt text for a finished round
pub fn build_prompt(summary: RoundSummary, round_seconds: u32) -> String {
    format!(
        "Du bist ein charismatischer, lustiger Basketball-Coach.\n\
         Ein Spieler hat gerade eine {seconds}-Sekunden-Runde beendet.\n\
         \n\
         Statistiken:\n\
         - Punkte: {score}\n\
         - Würfe insgesamt: {shots}\n\
         - Genauigkeit: {accuracy}% (jeder Treffer zählt 1 Punkt)\n\
         \n\
         Gib einen EINZIGEN, kurzen Satz (max 15 Wörter) als Kommentar auf Deutsch ab.\n\
         Sei motivierend, sarkastisch oder lustig, je nach Leistung.\n\
         \n\
         Beispiele:\n\
         - Schlecht: \"Der Korb war wohl vernagelt, was?\"\n\
         - Gut: \"Brenne ich, oder ist es hier so heiß? Wahnsinn!\"",
        seconds = round_seconds,
        score = summary.score,
        shots = summary.shots_taken,
        accuracy = summary.accuracy_percent(),
    )
}

async fn request_comment(
    settings: &RemarkSettings,
    key: &str,
    summary: RoundSummary,
    round_seconds: u32,
) -> Result<String> {
    let url = format!(
        "{}/models/{}:generateContent",
        settings.endpoint.trim_end_matches('/'),
        settings.model
    );
    let prompt = build_prompt(summary, round_seconds);

    let resp = http_client()?
        .post(&url)
        .query(&[("key", key)])
        .json(&GenerateRequest::new(&prompt))
        .send()
        .await
        .context("sending coach request")?;

    if !resp.status().is_success() {
        return Err(anyhow!("coach HTTP {}", resp.status()));
    }

    let body: GenerateResponse = resp.json().await.context("decoding coach response")?;
    Ok(body.text().unwrap_or_default().to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .context("building HTTP client")
}

#[cfg(target_arch = "wasm32")]
fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::new())
}

// --- wire format ---

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}
