use crate::server::error::internal::InternalError;

/// Parses a Discord snowflake from a String
///
/// Surrounding whitespace is ignored. Zero is rejected because serenity's ID
/// constructors panic on it and Discord never issues it.
///
/// # Arguments
/// - `value` - The string to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed a non-zero ID
/// - `Err(InternalError::ParseStringId)` - The string is not a u64
/// - `Err(InternalError::ZeroId)` - The string parsed to zero
pub fn parse_snowflake(value: &str) -> Result<u64, InternalError> {
    let trimmed = value.trim();
    let id = trimmed
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: trimmed.to_string(),
            source: e,
        })?;

    if id == 0 {
        return Err(InternalError::ZeroId(trimmed.to_string()));
    }

    Ok(id)
}
