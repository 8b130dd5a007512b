use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::error::BeleggingsMatchError;

use super::types::*;

/// Default base URL of the matching backend, used when neither the
/// environment nor the preference store overrides it.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Request timeout for matching and refinement calls. The wizard races
/// against this: when it fires, the caller substitutes the fallback list.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Report generation runs an LLM server-side and needs more headroom.
const REPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the external matching backend.
///
/// Stateless request/response translation only: every call takes the full
/// input and returns the parsed response. Transport failures, non-2xx
/// statuses and malformed bodies all surface as errors of the same rank;
/// the caller decides between fallback substitution (initial match) and a
/// user-visible message (refinement, report).
pub struct BackendClient {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, BeleggingsMatchError> {
        // Url::join treats a path without trailing slash as a file,
        // dropping the last segment. Normalize once here.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| BeleggingsMatchError::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .user_agent("BeleggingsMatch/1.0")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest client");

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BeleggingsMatchError> {
        self.base_url
            .join(path)
            .map_err(|e| BeleggingsMatchError::Config(format!("Invalid endpoint '{}': {}", path, e)))
    }

    /// POST a JSON body and parse a JSON response.
    async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<R, BeleggingsMatchError> {
        let url = self.endpoint(path)?;
        info!("POST {}", url);

        let response = self
            .client
            .post(url.clone())
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| BeleggingsMatchError::Backend(format!("Request to '{}' failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BeleggingsMatchError::Backend(format!(
                "'{}' returned {} {}",
                path,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| BeleggingsMatchError::Backend(format!("Failed to read '{}' body: {}", path, e)))?;

        serde_json::from_str(&text).map_err(|e| {
            warn!("Malformed response from '{}': {}", path, e);
            BeleggingsMatchError::InvalidResponse(format!("'{}' returned malformed JSON: {}", path, e))
        })
    }

    /// Primary matching call: full preference record in, ranked list out.
    /// The returned list is re-sorted defensively so the descending-score
    /// invariant holds regardless of backend behavior.
    pub async fn match_services(
        &self,
        preferences: &PreferenceRecord,
    ) -> Result<MatchResponse, BeleggingsMatchError> {
        let mut response: MatchResponse = self
            .post_json("match-diensten", preferences, REQUEST_TIMEOUT)
            .await?;
        sort_by_score(&mut response.matches);
        Ok(response)
    }

    /// Iterative refinement: original preferences plus the merged impact
    /// objects, one per answered follow-up question.
    pub async fn recalculate_matches(
        &self,
        original_preferences: &PreferenceRecord,
        impacts: &[serde_json::Value],
    ) -> Result<RecalculateResponse, BeleggingsMatchError> {
        let body = serde_json::json!({
            "original_preferences": original_preferences,
            "impacts": impacts,
        });
        let mut response: RecalculateResponse = self
            .post_json("recalculate-matches", &body, REQUEST_TIMEOUT)
            .await?;
        if let Some(matches) = response.matches.as_mut() {
            sort_by_score(matches);
        }
        Ok(response)
    }

    /// Free-text refinement.
    pub async fn process_text(
        &self,
        text: &str,
        preferences: &PreferenceRecord,
    ) -> Result<TextMatchResponse, BeleggingsMatchError> {
        let body = serde_json::json!({
            "text": text,
            "preferences": preferences,
        });
        let mut response: TextMatchResponse = self
            .post_json("process-text-and-match", &body, REQUEST_TIMEOUT)
            .await?;
        if let Some(matches) = response.new_matches.as_mut() {
            sort_by_score(matches);
        }
        Ok(response)
    }

    /// Second round-trip after an ambiguous free-text request.
    pub async fn process_clarification(
        &self,
        clarification_id: &str,
        selected_option: &serde_json::Value,
        preferences: &PreferenceRecord,
    ) -> Result<ClarificationResponse, BeleggingsMatchError> {
        let body = serde_json::json!({
            "clarification_id": clarification_id,
            "selected_option": selected_option,
            "preferences": preferences,
        });
        let mut response: ClarificationResponse = self
            .post_json("process-clarification", &body, REQUEST_TIMEOUT)
            .await?;
        if let Some(matches) = response.matches.as_mut() {
            sort_by_score(matches);
        }
        Ok(response)
    }

    /// Supplementary narrative for the results page. The request body is
    /// the flat preference record with the matches alongside.
    pub async fn generate_insights(
        &self,
        preferences: &PreferenceRecord,
        matches: &[MatchResult],
    ) -> Result<InsightsResponse, BeleggingsMatchError> {
        let mut body = preferences.clone();
        body.insert(
            "matches".to_string(),
            serde_json::to_value(matches)
                .map_err(|e| BeleggingsMatchError::InvalidResponse(e.to_string()))?,
        );
        self.post_json("generate-ai-insights", &body, REQUEST_TIMEOUT)
            .await
    }

    pub async fn submit_lead(
        &self,
        lead: &LeadRequest,
    ) -> Result<LeadResponse, BeleggingsMatchError> {
        self.post_json("submit-lead", lead, REQUEST_TIMEOUT).await
    }

    pub async fn generate_report(
        &self,
        request: &ReportRequest,
    ) -> Result<ReportResponse, BeleggingsMatchError> {
        self.post_json("generate-ai-report", request, REPORT_TIMEOUT)
            .await
    }

    /// Fetch the longer provider profile used to enrich the report.
    /// Best-effort: callers ignore errors from this one.
    pub async fn provider_profile(
        &self,
        provider_id: &str,
    ) -> Result<ProviderProfile, BeleggingsMatchError> {
        let url = self.endpoint(&format!("banks/{}", provider_id))?;
        info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BeleggingsMatchError::Backend(format!("Profile fetch failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BeleggingsMatchError::Backend(format!(
                "Profile fetch for '{}' returned {}",
                provider_id,
                status.as_u16()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BeleggingsMatchError::InvalidResponse(format!("Malformed provider profile: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = BackendClient::new("http://localhost:8000/api").unwrap();
        let url = client.endpoint("match-diensten").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/match-diensten");

        let client = BackendClient::new("http://localhost:8000/api/").unwrap();
        let url = client.endpoint("recalculate-matches").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/recalculate-matches");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = BackendClient::new("not a url");
        assert!(result.is_err());
        let msg = String::from(result.err().unwrap());
        assert!(msg.contains("Invalid API base URL"), "unexpected: {}", msg);
    }

    #[test]
    fn test_provider_profile_endpoint_shape() {
        let client = BackendClient::new(DEFAULT_API_BASE_URL).unwrap();
        let url = client.endpoint("banks/dienst_7").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/banks/dienst_7");
    }
}
