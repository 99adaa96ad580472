//! Score submission
//!
//! Features:
//! - Integer score/caught payload
//! - JSON envelope carrying the host session token
//! - Local fallback message when no host bridge is present
//! - Fire-and-forget POST; failures are logged, never retried

use serde::{Deserialize, Serialize};

use crate::consts::SCORE_ENDPOINT;
use crate::platform::HostBridge;
use crate::sim::SessionTotals;

/// Message shown after the server accepted a score
pub const SUBMITTED_MESSAGE: &str = "Score submitted!";

/// Result of a run as reported to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePayload {
    pub score: u64,
    pub caught: u32,
}

impl From<&SessionTotals> for ScorePayload {
    fn from(totals: &SessionTotals) -> Self {
        Self {
            score: totals.display_score(),
            caught: totals.caught,
        }
    }
}

/// Request body for `POST /session/score`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitBody {
    /// Left out of the JSON when the host supplied no token
    #[serde(rename = "initData", default, skip_serializing_if = "Option::is_none")]
    pub init_data: Option<String>,
    pub payload: ScorePayload,
}

/// What a submission request turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Send `body` (JSON) to `url`
    Post { url: &'static str, body: String },
    /// No host: just tell the player their result
    Local { message: String },
}

/// Decide how to submit the current totals
pub fn plan_submission(
    totals: &SessionTotals,
    bridge: &impl HostBridge,
) -> Result<Submission, serde_json::Error> {
    let payload = ScorePayload::from(totals);
    if !bridge.embedded() {
        return Ok(Submission::Local {
            message: format!("Score: {}\nCaught: {}", payload.score, payload.caught),
        });
    }

    let body = serde_json::to_string(&SubmitBody {
        init_data: bridge.session_token(),
        payload,
    })?;
    Ok(Submission::Post {
        url: SCORE_ENDPOINT,
        body,
    })
}

/// POST a JSON body (WASM only)
#[cfg(target_arch = "wasm32")]
async fn post_json(url: &str, body: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    Ok(())
}

/// Submit the totals through the host, or show them locally (WASM only)
///
/// Spawns the request and returns immediately.
#[cfg(target_arch = "wasm32")]
pub fn submit<B: HostBridge + 'static>(totals: &SessionTotals, bridge: B) {
    let submission = match plan_submission(totals, &bridge) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("submit failed: {}", e);
            return;
        }
    };

    match submission {
        Submission::Local { message } => bridge.alert(&message),
        Submission::Post { url, body } => {
            log::info!("Submitting score to {}", url);
            wasm_bindgen_futures::spawn_local(async move {
                match post_json(url, &body).await {
                    Ok(()) => bridge.alert(SUBMITTED_MESSAGE),
                    Err(e) => log::warn!("submit failed: {:?}", e),
                }
            });
        }
    }
}
