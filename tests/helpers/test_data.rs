//! Test data helpers for creating events, forms and wallet addresses

use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use uuid::Uuid;

use VolunteerPay::models::CreateEventRequest;
use VolunteerPay::services::{EventForm, JoinForm};

pub const ADMIN_ID: i64 = 1000;
pub const VOLUNTEER_ID: i64 = 2000;
pub const ADMIN_WALLET: &str = "0x7567d83b7b8d80addcb281a71d54fc7b3364ffed";

/// Random lowercase 20-byte hex address
pub fn random_wallet() -> String {
    let hex = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    format!("0x{}", &hex[..40])
}

pub fn volunteer_name() -> String {
    Name().fake()
}

pub fn phone_number() -> String {
    PhoneNumber().fake()
}

/// Join answers with a random name and phone number
pub fn join_form() -> JoinForm {
    JoinForm::new(volunteer_name(), phone_number())
}

/// Fully populated event insert
pub fn create_event_request() -> CreateEventRequest {
    CreateEventRequest {
        activity: "Beach cleanup".to_string(),
        date: chrono::NaiveDate::from_ymd_opt(2024, 7, 1).and_then(|d| d.and_hms_opt(9, 30, 0)),
        participant_strength: (5..50).fake(),
        organisation_name: CompanyName().fake(),
        description: Sentence(3..8).fake(),
        guarantor: Name().fake(),
        guarantor_contact: PhoneNumber().fake(),
    }
}

/// Creation answers with only the activity filled in
pub fn partial_event_form(activity: &str) -> EventForm {
    EventForm {
        activity: activity.to_string(),
        date: "-".to_string(),
        participant_strength: String::new(),
        ..Default::default()
    }
}

/// Creation answers as typed by an organiser
pub fn full_event_form() -> EventForm {
    EventForm {
        activity: "Food bank shift".to_string(),
        date: "2024-08-15T14:00".to_string(),
        participant_strength: "12".to_string(),
        organisation_name: CompanyName().fake(),
        description: Sentence(3..8).fake(),
        guarantor: Name().fake(),
        guarantor_contact: PhoneNumber().fake(),
    }
}
