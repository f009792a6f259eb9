use lazy_static::lazy_static;
use regex::Regex;

use super::dto::{CreateListRequest, UpdateListRequest};
use crate::error::{AppError, AppResult};

pub const NAME_MAX: usize = 50;

fn clean_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("List name is required"));
    }
    if name.chars().count() > NAME_MAX {
        return Err(AppError::validation(format!(
            "List name must be at most {NAME_MAX} characters"
        )));
    }
    Ok(name.to_string())
}

fn clean_color(color: &str) -> AppResult<String> {
    lazy_static! {
        static ref COLOR_RE: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
    }
    let color = color.trim();
    if !COLOR_RE.is_match(color) {
        return Err(AppError::validation("Color must look like #a1b2c3"));
    }
    Ok(color.to_lowercase())
}

pub fn validate_create(req: &mut CreateListRequest) -> AppResult<()> {
    req.name = clean_name(&req.name)?;
    if let Some(color) = req.color.as_deref() {
        req.color = Some(clean_color(color)?);
    }
    Ok(())
}

pub fn validate_update(req: &mut UpdateListRequest) -> AppResult<()> {
    if req.name.is_none() && req.color.is_none() {
        return Err(AppError::validation("No fields to update"));
    }
    if let Some(name) = req.name.as_deref() {
        req.name = Some(clean_name(name)?);
    }
    if let Some(Some(color)) = &req.color {
        let color = clean_color(color)?;
        req.color = Some(Some(color));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_trims_name_and_lowercases_color() {
        let mut req = CreateListRequest {
            name: "  Groceries ".into(),
            color: Some("#A1B2C3".into()),
        };
        validate_create(&mut req).unwrap();
        assert_eq!(req.name, "Groceries");
        assert_eq!(req.color.as_deref(), Some("#a1b2c3"));
    }

    #[test]
    fn create_rejects_blank_or_long_names() {
        let long = "n".repeat(NAME_MAX + 1);
        for name in ["", "   ", long.as_str()] {
            let mut req = CreateListRequest { name: name.into(), color: None };
            assert!(validate_create(&mut req).is_err(), "{name:?}");
        }
    }

    #[test]
    fn create_rejects_malformed_colors() {
        for color in ["red", "#abc", "#12345g", "a1b2c3"] {
            let mut req = CreateListRequest { name: "Work".into(), color: Some(color.into()) };
            assert!(validate_create(&mut req).is_err(), "{color:?}");
        }
    }

    #[test]
    fn update_distinguishes_missing_and_null_color() {
        let missing: UpdateListRequest = serde_json::from_str(r#"{"name":"Home"}"#).unwrap();
        assert!(missing.color.is_none());

        let cleared: UpdateListRequest = serde_json::from_str(r#"{"color":null}"#).unwrap();
        assert_eq!(cleared.color, Some(None));

        let mut set: UpdateListRequest = serde_json::from_str(r##"{"color":"#FFFFFF"}"##).unwrap();
        validate_update(&mut set).unwrap();
        assert_eq!(set.color, Some(Some("#ffffff".into())));
    }

    #[test]
    fn empty_update_is_rejected() {
        let mut req: UpdateListRequest = serde_json::from_str("{}").unwrap();
        let err = validate_update(&mut req).unwrap_err();
        assert_eq!(err.to_string(), "No fields to update");
    }

    #[test]
    fn update_validates_name_when_present() {
        let mut req = UpdateListRequest { name: Some("  ".into()), color: None };
        assert!(validate_update(&mut req).is_err());
    }
}
