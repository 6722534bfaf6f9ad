//! The company aggregate: a company owns its translations and packets, and
//! every packet owns its jobs.

pub mod hydration;
pub mod job;
pub mod language;
pub mod packet;
pub mod slug;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use hydration::{CompanyForm, HydrationError, TranslationPatch};
pub use job::{Job, JobForm};
pub use language::Language;
pub use packet::{compute_status, CompanyPacket, PacketError, PacketForm, PacketStatus};

/// Fields that exist once per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TranslatedField {
    Slogan,
    Website,
    Description,
    Logo,
    Name,
    SlugName,
    Address,
    Email,
    Phone,
}

impl TranslatedField {
    pub const ALL: [TranslatedField; 9] = [
        TranslatedField::Slogan,
        TranslatedField::Website,
        TranslatedField::Description,
        TranslatedField::Logo,
        TranslatedField::Name,
        TranslatedField::SlugName,
        TranslatedField::Address,
        TranslatedField::Email,
        TranslatedField::Phone,
    ];

    /// Key suffix used in the flat `<lang>_<key>` format.
    pub fn key(self) -> &'static str {
        match self {
            TranslatedField::Slogan => "slogan",
            TranslatedField::Website => "website",
            TranslatedField::Description => "description",
            TranslatedField::Logo => "logo",
            TranslatedField::Name => "name",
            TranslatedField::SlugName => "slugName",
            TranslatedField::Address => "address",
            TranslatedField::Email => "email",
            TranslatedField::Phone => "phone",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct TranslationFields {
    pub slogan: String,
    pub website: String,
    pub description: String,
    pub logo: String,
    pub name: String,
    pub slug_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl TranslationFields {
    pub fn get(&self, field: TranslatedField) -> &str {
        match field {
            TranslatedField::Slogan => &self.slogan,
            TranslatedField::Website => &self.website,
            TranslatedField::Description => &self.description,
            TranslatedField::Logo => &self.logo,
            TranslatedField::Name => &self.name,
            TranslatedField::SlugName => &self.slug_name,
            TranslatedField::Address => &self.address,
            TranslatedField::Email => &self.email,
            TranslatedField::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: TranslatedField, value: String) {
        let slot = match field {
            TranslatedField::Slogan => &mut self.slogan,
            TranslatedField::Website => &mut self.website,
            TranslatedField::Description => &mut self.description,
            TranslatedField::Logo => &mut self.logo,
            TranslatedField::Name => &mut self.name,
            TranslatedField::SlugName => &mut self.slug_name,
            TranslatedField::Address => &mut self.address,
            TranslatedField::Email => &mut self.email,
            TranslatedField::Phone => &mut self.phone,
        };
        *slot = value;
    }
}

/// Per-language details of a company.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct CompanyI18n {
    pub company_id: Uuid,
    pub language: Language,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: TranslationFields,
}

impl CompanyI18n {
    pub fn new(company_id: Uuid, language: Language) -> Self {
        CompanyI18n {
            company_id,
            language,
            fields: TranslationFields::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub slug_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub hidden: bool,
    #[sqlx(skip)]
    pub translations: BTreeMap<Language, CompanyI18n>,
    #[sqlx(skip)]
    pub packets: Vec<CompanyPacket>,
}

impl Company {
    pub fn new(name: &str, slug_name: &str) -> Self {
        Company {
            id: Uuid::now_v7(),
            name: name.to_string(),
            slug_name: slug_name.to_string(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            hidden: false,
            translations: BTreeMap::new(),
            packets: Vec::new(),
        }
    }

    /// Insert a translation, returning the one it replaced for the same language.
    pub fn add_translation(&mut self, mut translation: CompanyI18n) -> Option<CompanyI18n> {
        translation.company_id = self.id;
        self.translations
            .insert(translation.language.clone(), translation)
    }

    pub fn remove_translation(&mut self, language: &Language) -> Option<CompanyI18n> {
        self.translations.remove(language)
    }

    pub fn translation(&self, locale: &Language) -> Option<&CompanyI18n> {
        self.translations.get(locale)
    }

    pub fn languages(&self) -> Vec<Language> {
        self.translations.keys().cloned().collect()
    }

    pub fn add_packet(&mut self, mut packet: CompanyPacket) {
        packet.company_id = self.id;
        self.packets.push(packet);
    }

    pub fn remove_packet(&mut self, packet_id: Uuid) -> Option<CompanyPacket> {
        let index = self.packets.iter().position(|p| p.id == packet_id)?;
        Some(self.packets.remove(index))
    }

    /// Jobs across all packets, expired and unpublished ones included.
    pub fn number_of_jobs(&self) -> usize {
        self.packets.iter().map(|p| p.jobs.len()).sum()
    }

    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.packets.iter().flat_map(|p| p.jobs.iter())
    }

    /// Active jobs inside packets that are active at `now`.
    pub fn active_jobs(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Job> {
        self.packets
            .iter()
            .filter(move |p| p.is_active(now))
            .flat_map(|p| p.jobs.iter())
            .filter(|j| j.active)
    }

    pub fn find_job(&self, ascii_name: &str) -> Option<&Job> {
        self.jobs().find(|j| j.ascii_name == ascii_name)
    }
}
