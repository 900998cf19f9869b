use crate::{Error, Result};
use std::collections::HashMap;

/// Name of the task parameter carrying the comma-separated channel handles.
pub const CHANNELS_PARAMETER: &str = "canais";

/// Split the raw `canais` parameter into an ordered list of channel handles.
///
/// The split is a plain comma split: no trimming, no deduplication, no
/// emptiness checks. The runner is expected to pass a well-formed list.
pub fn split_channels(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Extract the channel list from the task parameter map.
///
/// A missing `canais` parameter is a startup error and aborts the run.
pub fn channels_from_parameters(parameters: &HashMap<String, String>) -> Result<Vec<String>> {
    let raw = parameters
        .get(CHANNELS_PARAMETER)
        .ok_or_else(|| Error::MissingParameter(CHANNELS_PARAMETER.to_string()))?;

    Ok(split_channels(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_order() {
        let channels = split_channels("a,b,c");
        assert_eq!(channels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_does_not_trim() {
        // The runner owns list hygiene; we pass handles through untouched
        let channels = split_channels("botcity_br, youtube");
        assert_eq!(channels, vec!["botcity_br", " youtube"]);
    }

    #[test]
    fn test_split_single_handle() {
        let channels = split_channels("github");
        assert_eq!(channels, vec!["github"]);
    }

    #[test]
    fn test_channels_from_parameters() {
        let mut parameters = HashMap::new();
        parameters.insert(CHANNELS_PARAMETER.to_string(), "a,b".to_string());

        let channels = channels_from_parameters(&parameters).unwrap();
        assert_eq!(channels, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_parameter_is_an_error() {
        let parameters = HashMap::new();
        let result = channels_from_parameters(&parameters);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("canais"));
    }
}
