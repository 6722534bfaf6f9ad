use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketStatus {
    /// Publication window has not started yet.
    Future,
    /// Inside the window and published.
    Active,
    /// Inside the window but not published.
    Unpublished,
    /// Past the expiration date.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    InvalidWindow { starts: NaiveDate, expires: NaiveDate },
}

impl std::fmt::Display for PacketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PacketError::InvalidWindow { starts, expires } => {
                write!(f, "Packet expires ({expires}) before it starts ({starts})")
            }
        }
    }
}

impl std::error::Error for PacketError {}

/// Status of a publication window at `now`. Dates are taken at 00:00 UTC and
/// the window is `[starts, expires)`, so the `expires` instant is no longer active.
pub fn compute_status(
    now: DateTime<Utc>,
    starts: NaiveDate,
    expires: NaiveDate,
    published: bool,
) -> PacketStatus {
    if now >= day_start(expires) {
        PacketStatus::Expired
    } else if now < day_start(starts) {
        PacketStatus::Future
    } else if published {
        PacketStatus::Active
    } else {
        PacketStatus::Unpublished
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// A purchased, time-bounded publication slot of a company.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct CompanyPacket {
    pub id: Uuid,
    pub company_id: Uuid,
    pub starts: NaiveDate,
    pub expires: NaiveDate,
    pub published: bool,
    #[sqlx(skip)]
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PacketForm {
    #[serde(alias = "startingDate")]
    pub starts: Option<NaiveDate>,
    #[serde(alias = "expirationDate")]
    pub expires: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::form::optional_flag")]
    pub published: Option<bool>,
}

impl CompanyPacket {
    pub fn new(
        company_id: Uuid,
        starts: NaiveDate,
        expires: NaiveDate,
    ) -> Result<Self, PacketError> {
        if expires < starts {
            return Err(PacketError::InvalidWindow { starts, expires });
        }
        Ok(CompanyPacket {
            id: Uuid::now_v7(),
            company_id,
            starts,
            expires,
            published: false,
            jobs: Vec::new(),
        })
    }

    /// Strictly past the expiration instant; the sweeper unpublishes on this.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > day_start(self.expires)
    }

    pub fn status(&self, now: DateTime<Utc>) -> PacketStatus {
        compute_status(now, self.starts, self.expires, self.published)
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.status(now) == PacketStatus::Active
    }

    /// Unpublish an expired packet. Returns whether anything changed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        if self.published && self.is_expired(now) {
            self.published = false;
            true
        } else {
            false
        }
    }

    pub fn add_job(&mut self, mut job: Job) {
        job.packet_id = self.id;
        self.jobs.push(job);
    }

    pub fn remove_job(&mut self, job_id: Uuid) -> Option<Job> {
        let index = self.jobs.iter().position(|j| j.id == job_id)?;
        Some(self.jobs.remove(index))
    }

    /// Apply a form; the packet is left untouched when the resulting window is invalid.
    pub fn exchange(&mut self, form: PacketForm) -> Result<(), PacketError> {
        let starts = form.starts.unwrap_or(self.starts);
        let expires = form.expires.unwrap_or(self.expires);
        if expires < starts {
            return Err(PacketError::InvalidWindow { starts, expires });
        }
        self.starts = starts;
        self.expires = expires;
        if let Some(published) = form.published {
            self.published = published;
        }
        Ok(())
    }
}
