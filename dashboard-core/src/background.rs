use crate::{error::DashboardError, model::CurrentConditions, provider::ImageSource};

/// Shown whenever no photo could be fetched.
pub const PLACEHOLDER_BACKGROUND_URL: &str = "/api/placeholder/1920/1080?text=Raindrop+Background";

/// Photo search query for the current sky.
pub fn background_query(is_day: bool, condition_text: &str) -> String {
    let condition = condition_text.to_lowercase();
    let clear = condition.contains("clear");

    match (is_day, clear) {
        (true, true) => "clear sky".to_string(),
        (true, false) => condition,
        (false, true) => "night sky".to_string(),
        (false, false) => format!("night {condition}"),
    }
}

/// Fetch a background for `current`. Failures are logged and yield `None`.
pub async fn fetch_background(
    images: Option<&dyn ImageSource>,
    current: &CurrentConditions,
) -> Option<String> {
    let Some(images) = images else {
        tracing::info!("no image source configured, using placeholder background");
        return None;
    };

    let query = background_query(current.is_day, &current.condition.text);

    match images.random_photo(&query).await {
        Ok(url) => {
            tracing::debug!(%query, %url, "background image resolved");
            Some(url).filter(|u| !u.is_empty())
        }
        Err(err) => {
            let err = DashboardError::ImageFetchFailed(err.to_string());
            tracing::error!(%query, error = %err, "background image fetch failed");
            None
        }
    }
}
