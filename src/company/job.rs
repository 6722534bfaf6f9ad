use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::slugify;
use super::Language;

/// A job posting, owned by exactly one packet.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub packet_id: Uuid,
    pub name: String,
    pub ascii_name: String,
    pub active: bool,
    pub website: String,
    pub phone: String,
    pub email: String,
    pub description: String,
    pub language: Language,
}

/// Partial job update. Absent keys leave the job untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobForm {
    pub name: Option<String>,
    pub ascii_name: Option<String>,
    #[serde(default, deserialize_with = "crate::form::optional_flag")]
    pub active: Option<bool>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub language: Option<Language>,
}

impl Job {
    pub fn new(packet_id: Uuid, language: Language) -> Self {
        Job {
            id: Uuid::now_v7(),
            packet_id,
            name: String::new(),
            ascii_name: String::new(),
            active: false,
            website: String::new(),
            phone: String::new(),
            email: String::new(),
            description: String::new(),
            language,
        }
    }

    pub fn exchange(&mut self, form: JobForm) {
        if let Some(name) = form.name {
            self.name = name;
        }
        if let Some(ascii_name) = form.ascii_name {
            self.ascii_name = ascii_name;
        }
        if let Some(active) = form.active {
            self.active = active;
        }
        if let Some(website) = form.website {
            self.website = website;
        }
        if let Some(phone) = form.phone {
            self.phone = phone;
        }
        if let Some(email) = form.email {
            self.email = email;
        }
        if let Some(description) = form.description {
            self.description = description;
        }
        if let Some(language) = form.language {
            self.language = language;
        }

        if self.ascii_name.is_empty() {
            self.ascii_name = slugify(&self.name);
        }
    }
}
