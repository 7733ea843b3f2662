/// Shorten a text to the given `length` by replacing any additional characters with an ellipsis
/// character ("…").
#[askama::filter_fn]
pub fn ellipsis(value: &str, _: &dyn askama::Values, length: usize) -> askama::Result<String> {
    if length > 0 && value.chars().count() > length {
        Ok(format!(
            "{}…",
            value.chars().take(length - 1).collect::<String>()
        ))
    } else {
        Ok(value.to_owned())
    }
}
