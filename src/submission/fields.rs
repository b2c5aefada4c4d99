use std::collections::HashMap;

use crate::error::AppError;

use super::parser::{Attachment, UploadForm};

/// Ages at or above this value must include a photo.
pub const PHOTO_REQUIRED_AGE: i32 = 15;

pub const INVALID_TEXT_DATA: &str = "Missing or invalid text data";
pub const PHOTO_REQUIRED: &str = "Photo is required for age 15 and above";

/// A form that passed every check, with `age` already coerced.
#[derive(Debug)]
pub struct ValidSubmission {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub age: i32,
    pub photo: Option<Attachment>,
}

/// Run the ordered checks; the first failure wins.
pub fn validate(form: UploadForm) -> Result<ValidSubmission, AppError> {
    let UploadForm { mut fields, photo } = form;

    let (Some(first_name), Some(last_name), Some(dob)) = (
        take_text(&mut fields, "firstName"),
        take_text(&mut fields, "lastName"),
        take_text(&mut fields, "dob"),
    ) else {
        return Err(AppError::BadRequest(INVALID_TEXT_DATA.to_string()));
    };

    let age = take_text(&mut fields, "age")
        .and_then(|raw| parse_age(&raw))
        .ok_or_else(|| AppError::BadRequest(INVALID_TEXT_DATA.to_string()))?;

    if photo.is_none() && requires_photo(age) {
        return Err(AppError::BadRequest(PHOTO_REQUIRED.to_string()));
    }

    Ok(ValidSubmission {
        first_name,
        last_name,
        dob,
        age,
        photo,
    })
}

pub fn requires_photo(age: i32) -> bool {
    age >= PHOTO_REQUIRED_AGE
}

/// Base-10 integer, surrounding whitespace ignored.
fn parse_age(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

fn take_text(fields: &mut HashMap<String, String>, name: &str) -> Option<String> {
    fields.remove(name).filter(|v| !v.trim().is_empty())
}
