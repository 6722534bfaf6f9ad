use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::{Company, CompanyI18n, Language, TranslatedField, TranslationFields};

static TRANSLATED_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([a-z]{2,3})_(slogan|website|description|logo|name|slugName|address|email|phone)$",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationError {
    InvalidLanguage(String),
    InvalidValue { key: String },
    InvalidSlug(String),
}

impl std::fmt::Display for HydrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HydrationError::InvalidLanguage(code) => write!(f, "Invalid language code: {code}"),
            HydrationError::InvalidValue { key } => write!(f, "Invalid value for {key}"),
            HydrationError::InvalidSlug(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for HydrationError {}

/// Field overrides for one language. Fields not present keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationPatch {
    pub fields: BTreeMap<TranslatedField, String>,
}

impl TranslationPatch {
    pub fn set(&mut self, field: TranslatedField, value: impl Into<String>) -> &mut Self {
        self.fields.insert(field, value.into());
        self
    }

    pub fn apply(&self, target: &mut TranslationFields) {
        for (field, value) in &self.fields {
            target.set(*field, value.clone());
        }
    }
}

/// Typed company update.
///
/// `languages` is the complete set of translations the company should have
/// afterwards; `None` keeps the current set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyForm {
    pub name: Option<String>,
    pub slug_name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hidden: Option<bool>,
    pub languages: Option<Vec<Language>>,
    pub translations: BTreeMap<Language, TranslationPatch>,
}

impl CompanyForm {
    /// Parse the flat `<lang>_<field>` format. Unknown keys are ignored and
    /// malformed values fall back to the current field value. Only language
    /// codes are rejected, since they key the translation map.
    pub fn from_flat(data: &Map<String, Value>) -> Result<Self, HydrationError> {
        let mut form = CompanyForm {
            name: string_field(data, "name"),
            slug_name: string_field(data, "slugName"),
            address: string_field(data, "address"),
            email: string_field(data, "email"),
            phone: string_field(data, "phone"),
            hidden: data.get("hidden").and_then(parse_flag),
            languages: languages_field(data)?,
            translations: BTreeMap::new(),
        };

        for (key, value) in data {
            let Some(caps) = TRANSLATED_KEY_RE.captures(key) else {
                continue;
            };
            let Some(value) = scalar_string(value) else {
                continue;
            };
            let language = Language::parse(&caps[1])?;
            let Some(field) = TranslatedField::from_key(&caps[2]) else {
                continue;
            };
            form.translations
                .entry(language)
                .or_default()
                .set(field, value);
        }

        Ok(form)
    }
}

impl Company {
    /// Flat snapshot: untranslated scalars, `languages`, and `<lang>_<field>` keys.
    pub fn to_flat(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(self.id.to_string()));
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert("slugName".to_string(), Value::String(self.slug_name.clone()));
        map.insert("address".to_string(), Value::String(self.address.clone()));
        map.insert("email".to_string(), Value::String(self.email.clone()));
        map.insert("phone".to_string(), Value::String(self.phone.clone()));
        map.insert("hidden".to_string(), Value::Bool(self.hidden));

        let mut languages = Vec::with_capacity(self.translations.len());
        for (language, translation) in &self.translations {
            for field in TranslatedField::ALL {
                map.insert(
                    format!("{language}_{}", field.key()),
                    Value::String(translation.fields.get(field).to_string()),
                );
            }
            languages.push(Value::String(language.to_string()));
        }
        map.insert("languages".to_string(), Value::Array(languages));

        map
    }

    /// Apply a form and return the translations that were dropped from the company.
    ///
    /// The form is fully parsed before this is called, so the update cannot
    /// fail halfway through.
    pub fn exchange(&mut self, form: CompanyForm) -> Vec<CompanyI18n> {
        if let Some(name) = form.name {
            self.name = name;
        }
        if let Some(slug_name) = form.slug_name {
            self.slug_name = slug_name;
        }
        if let Some(address) = form.address {
            self.address = address;
        }
        if let Some(email) = form.email {
            self.email = email;
        }
        if let Some(phone) = form.phone {
            self.phone = phone;
        }
        if let Some(hidden) = form.hidden {
            self.hidden = hidden;
        }

        let languages = form.languages.unwrap_or_else(|| self.languages());
        let mut previous = std::mem::take(&mut self.translations);
        let mut next = BTreeMap::new();

        for language in languages {
            if next.contains_key(&language) {
                continue;
            }
            let mut translation = previous
                .remove(&language)
                .unwrap_or_else(|| CompanyI18n::new(self.id, language.clone()));
            if let Some(patch) = form.translations.get(&language) {
                patch.apply(&mut translation.fields);
            }
            next.insert(language, translation);
        }

        self.translations = next;
        previous.into_values().collect()
    }
}

/// Scalars become strings; anything else is treated as absent.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_field(data: &Map<String, Value>, key: &str) -> Option<String> {
    data.get(key).and_then(scalar_string)
}

/// Accepts JSON booleans, numbers 0/1, and the usual checkbox strings.
/// Anything unrecognized is `None`, so the current value is kept.
pub fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "0" | "false" | "off" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn languages_field(data: &Map<String, Value>) -> Result<Option<Vec<Language>>, HydrationError> {
    let codes: Vec<&str> = match data.get("languages") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.split(',').filter(|c| !c.trim().is_empty()).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| HydrationError::InvalidValue {
                    key: "languages".to_string(),
                })
            })
            .collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(HydrationError::InvalidValue {
                key: "languages".to_string(),
            })
        }
    };

    codes
        .into_iter()
        .map(Language::parse)
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
