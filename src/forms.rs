use serde::Deserialize;

pub const REVIEW_MAX_CHARS: usize = 250;

/// Field name to message, in the order the fields appear on the form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|(name, _)| *name == field).map(|(_, msg)| msg.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditForm {
    pub rating: String,
    pub review: String,
    pub csrf_token: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RatingReview {
    pub rating: f64,
    pub review: String,
}

impl EditForm {
    pub fn validate(&self) -> Result<RatingReview, FieldErrors> {
        let mut errors = FieldErrors::default();

        let rating = self.rating.trim();
        let parsed = if rating.is_empty() {
            errors.push("rating", "Required field");
            None
        } else {
            match rating.parse::<f64>() {
                Ok(value) if value.is_finite() => Some(value),
                _ => {
                    errors.push("rating", "Rating must be a number, e.g. 7.5");
                    None
                },
            }
        };

        if self.review.trim().is_empty() {
            errors.push("review", "Required field");
        } else if self.review.chars().count() > REVIEW_MAX_CHARS {
            errors.push("review", format!("Review must be at most {REVIEW_MAX_CHARS} characters"));
        }

        match parsed {
            Some(rating) if errors.is_empty() => {
                Ok(RatingReview { rating, review: self.review.clone() })
            },
            _ => Err(errors),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddForm {
    pub title: String,
    pub csrf_token: String,
}

impl AddForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let title = self.title.trim();
        if title.is_empty() {
            let mut errors = FieldErrors::default();
            errors.push("title", "Enter a movie title");
            return Err(errors);
        }
        Ok(title.to_string())
    }
}
