//! Free-text surf forecast retrieval.
//!
//! Independent of the per-station pipeline: fetched once per run from a
//! third-party page, located by fixed text markers, and stripped of ad
//! lines. Failures here use their own error type so they are never
//! conflated with station failures.

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::ForecastError;
use crate::fetch::HttpClient;

/// Page carrying the human-written Maui surf forecast.
pub const FORECAST_URL: &str = "https://www.hawaiiweathertoday.com/surfing/";

/// Fetches the forecast page and extracts the forecast text.
pub async fn fetch_surf_forecast<C: HttpClient + ?Sized>(
    client: &C,
) -> Result<String, ForecastError> {
    let resp = client.get(FORECAST_URL).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ForecastError::Status(status));
    }
    let html = resp.text().await?;
    extract_forecast(&html)
}

/// Extracts the forecast body from the page HTML: the text between the
/// "Forecast" marker and the "maui beaches" section of the first element
/// containing both, minus ad lines.
pub fn extract_forecast(html: &str) -> Result<String, ForecastError> {
    let doc = Html::parse_document(html);
    let candidates =
        Selector::parse("p, div, span, section").expect("static CSS selector is valid");
    // "Forecast" is matched case-sensitively, the end marker is not,
    // mirroring how the page capitalizes its sections.
    let between = Regex::new(r"(?s)Forecast(.*?)(?i:maui beaches)")
        .expect("static forecast marker regex is valid");

    for element in doc.select(&candidates) {
        let text: String = element.text().collect();
        if !(text.contains("Forecast") && text.to_lowercase().contains("maui beaches")) {
            continue;
        }
        debug!(len = text.len(), "Forecast element located");

        let Some(caps) = between.captures(&text) else {
            return Err(ForecastError::MarkersNotMatched);
        };
        let body = caps[1].trim();
        let filtered = body
            .lines()
            .filter(|line| !line.to_lowercase().contains("google"))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
        return Ok(filtered);
    }

    Err(ForecastError::ElementNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_text_between_markers() {
        let html = r#"
            <html><body>
              <div id="content">
                <p>Surf Forecast
                   NW swell holding through Friday.
                   South shore stays small.
                   Maui Beaches report follows.</p>
              </div>
            </body></html>
        "#;
        let forecast = extract_forecast(html).unwrap();
        assert!(forecast.contains("NW swell holding through Friday."));
        assert!(forecast.contains("South shore stays small."));
        assert!(!forecast.contains("Maui Beaches"));
    }

    #[test]
    fn test_ad_lines_are_filtered() {
        let html = r#"
            <div>Forecast
                 Solid NW swell incoming.
                 Ads by Google
                 Light trades all week.
                 maui beaches</div>
        "#;
        let forecast = extract_forecast(html).unwrap();
        assert!(forecast.contains("Solid NW swell incoming."));
        assert!(forecast.contains("Light trades all week."));
        assert!(!forecast.to_lowercase().contains("google"));
    }

    #[test]
    fn test_end_marker_is_case_insensitive() {
        let html = "<div>Forecast body text MAUI BEACHES</div>";
        assert_eq!(extract_forecast(html).unwrap(), "body text");
    }

    #[test]
    fn test_missing_element_is_an_error() {
        let html = "<div>Nothing relevant here</div>";
        assert!(matches!(
            extract_forecast(html),
            Err(ForecastError::ElementNotFound)
        ));
    }

    #[test]
    fn test_lowercase_forecast_marker_does_not_match() {
        // The start marker is case-sensitive by design.
        let html = "<div>forecast body maui beaches</div>";
        assert!(matches!(
            extract_forecast(html),
            Err(ForecastError::ElementNotFound)
        ));
    }
}
