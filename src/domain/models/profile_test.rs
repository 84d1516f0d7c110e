use chrono::Local;
use chrono::TimeZone;

use super::FarmerProfile;
use super::ProfileForm;
use super::SoilType;

#[test]
fn it_stamps_profiles_with_minute_precision() {
    let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
    let profile = FarmerProfile::from_form_at(
        ProfileForm {
            location: "Nashik".to_string(),
            farm_size: "2 acres".to_string(),
            crop_type: "Onion".to_string(),
            soil_type: SoilType::Black,
        },
        now,
    );

    assert_eq!(profile.location, "Nashik");
    assert_eq!(profile.farm_size, "2 acres");
    assert_eq!(profile.crop_type, "Onion");
    assert_eq!(profile.soil_type, SoilType::Black);
    assert_eq!(profile.updated, "2024-03-09 07:05");
}
