use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;
use crate::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Pending,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "active" => SubscriptionStatus::Active,
            "expired" => SubscriptionStatus::Expired,
            "cancelled" => SubscriptionStatus::Cancelled,
            _ => SubscriptionStatus::Pending,
        }
    }
}

pub const SUBSCRIPTION_STATUSES: &[SubscriptionStatus] = &[
    SubscriptionStatus::Pending,
    SubscriptionStatus::Active,
    SubscriptionStatus::Expired,
    SubscriptionStatus::Cancelled,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionType {
    DayPass,
    Monthly,
    Quarterly,
    Yearly,
}

impl SubscriptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::DayPass => "day_pass",
            SubscriptionType::Monthly => "monthly",
            SubscriptionType::Quarterly => "quarterly",
            SubscriptionType::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "day_pass" => SubscriptionType::DayPass,
            "quarterly" => SubscriptionType::Quarterly,
            "yearly" => SubscriptionType::Yearly,
            _ => SubscriptionType::Monthly,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionType::DayPass => "Day Pass",
            SubscriptionType::Monthly => "Monthly",
            SubscriptionType::Quarterly => "Quarterly",
            SubscriptionType::Yearly => "Yearly",
        }
    }
}

pub const SUBSCRIPTION_TYPES: &[SubscriptionType] = &[
    SubscriptionType::DayPass,
    SubscriptionType::Monthly,
    SubscriptionType::Quarterly,
    SubscriptionType::Yearly,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    Passport,
    NationalId,
    DriversLicense,
}

impl IdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::Passport => "passport",
            IdType::NationalId => "national_id",
            IdType::DriversLicense => "drivers_license",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "passport" => IdType::Passport,
            "drivers_license" => IdType::DriversLicense,
            _ => IdType::NationalId,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IdType::Passport => "Passport",
            IdType::NationalId => "National ID",
            IdType::DriversLicense => "Driver's License",
        }
    }
}

pub const ID_TYPES: &[IdType] = &[IdType::NationalId, IdType::Passport, IdType::DriversLicense];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub id_number: String,
    pub id_type: IdType,
    pub subscription_status: SubscriptionStatus,
    pub subscription_type: SubscriptionType,
    pub amount_to_pay_cents: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn amount_display(&self) -> String {
        format::price(self.amount_to_pay_cents)
    }

    pub fn start_date_display(&self) -> String {
        format::date(self.start_date)
    }
}

impl FromSqliteRow for Member {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let id_type: String = row.get("id_type")?;
        let status: String = row.get("subscription_status")?;
        let sub_type: String = row.get("subscription_type")?;
        Ok(Self {
            id: row.get("id")?,
            full_name: row.get("full_name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            address: row.get("address")?,
            postal_code: row.get("postal_code")?,
            id_number: row.get("id_number")?,
            id_type: IdType::parse(&id_type),
            subscription_status: SubscriptionStatus::parse(&status),
            subscription_type: SubscriptionType::parse(&sub_type),
            amount_to_pay_cents: row.get("amount_to_pay_cents")?,
            start_date: row.get("start_date")?,
            end_date: row.get("end_date")?,
            owner_id: row.get("owner_id")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Shared shape of the add and edit member forms.
#[derive(Debug, Deserialize)]
pub struct MemberForm {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub id_number: String,
    pub id_type: IdType,
    pub subscription_status: SubscriptionStatus,
    pub subscription_type: SubscriptionType,
    pub amount_to_pay_cents: i64,
}
