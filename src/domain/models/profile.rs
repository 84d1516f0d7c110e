#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter, strum::Display,
)]
pub enum SoilType {
    Alluvial,
    Black,
    Red,
    Sandy,
    Clay,
    Loamy,
    #[default]
    Unknown,
}

/// Raw values from the profile form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub location: String,
    pub farm_size: String,
    pub crop_type: String,
    pub soil_type: SoilType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerProfile {
    pub location: String,
    pub farm_size: String,
    pub crop_type: String,
    pub soil_type: SoilType,
    pub updated: String,
}

impl FarmerProfile {
    pub fn from_form(form: ProfileForm) -> FarmerProfile {
        return FarmerProfile::from_form_at(form, Local::now());
    }

    pub fn from_form_at(form: ProfileForm, now: DateTime<Local>) -> FarmerProfile {
        return FarmerProfile {
            location: form.location,
            farm_size: form.farm_size,
            crop_type: form.crop_type,
            soil_type: form.soil_type,
            updated: now.format("%Y-%m-%d %H:%M").to_string(),
        };
    }
}
