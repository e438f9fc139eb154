//! Synthetic PII record generation.
//!
//! Every chunk worker owns one [`RecordGenerator`]; records are generated
//! independently with no cross-field or cross-record consistency, and
//! duplicate emails or IDs can occur.

use fake::Fake;
use fake::faker::address::en::{
    BuildingNumber, CityName, StateAbbr, StreetName, StreetSuffix, ZipCode,
};
use fake::faker::company::en::{CompanyName, Profession};
use fake::faker::creditcard::en::CreditCardNumber;
use fake::faker::internet::en::{FreeEmail, IPv4};
use fake::faker::name::en::Name;
use fake::faker::number::en::NumberWithFormat;
use fake::faker::phone_number::en::PhoneNumber;
use jiff::civil::Date;
use jiff::{Span, Zoned};
use rand::rngs::ThreadRng;
use rand::Rng;

/// Column names of every chunk file and of the final output, in order.
pub const FIELD_NAMES: [&str; 27] = [
    "Name",
    "Email",
    "Date of birth",
    "Phone Number",
    "Location",
    "Postal Code",
    "Gender",
    "Marital Status",
    "Blood Type",
    "Religion",
    "Credit Card Number",
    "Card Expiry Date",
    "CVV/CVC code",
    "Bank Account Number",
    "Swift Code",
    "Credit Score",
    "National ID number",
    "Driver License Number",
    "Passport Number",
    "Voter ID Number",
    "Health Insurance ID",
    "IP Address",
    "Device ID",
    "Social Media profile links",
    "Organization",
    "Occupation",
    "Employee ID",
];

const GENDERS: [&str; 3] = ["Male", "Female", "Non-binary"];
const MARITAL_STATUSES: [&str; 3] = ["Single", "Married", "Divorced"];
const BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
const RELIGIONS: [&str; 4] = ["Christianity", "Islam", "Hinduism", "Atheist"];

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const UPPER_ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generated people are between 18 and 70 years old.
const MIN_AGE_DAYS: i64 = 18 * 365;
const MAX_AGE_DAYS: i64 = 70 * 365;

/// Produces randomized PII records.
///
/// Owns its random source; each worker constructs a fresh one so no random
/// state is shared across workers.
pub struct RecordGenerator<R: Rng> {
    rng: R,
    today: Date,
}

impl RecordGenerator<ThreadRng> {
    /// Generator drawing from the thread-local random source.
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for RecordGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RecordGenerator<R> {
    /// Generator over an explicit random source, seedable in tests.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            today: Zoned::now().date(),
        }
    }

    /// One record, values in [`FIELD_NAMES`] order.
    pub fn generate(&mut self) -> [String; 27] {
        let name: String = Name().fake_with_rng(&mut self.rng);
        let profile_link = format!(
            "https://linkedin.com/in/{}",
            name.to_lowercase().replace(' ', "-")
        );
        [
            name,
            FreeEmail().fake_with_rng(&mut self.rng),
            self.date_of_birth(),
            PhoneNumber().fake_with_rng(&mut self.rng),
            self.location(),
            ZipCode().fake_with_rng(&mut self.rng),
            self.choose(&GENDERS),
            self.choose(&MARITAL_STATUSES),
            self.choose(&BLOOD_TYPES),
            self.choose(&RELIGIONS),
            CreditCardNumber().fake_with_rng(&mut self.rng),
            self.card_expiry(),
            NumberWithFormat("###").fake_with_rng(&mut self.rng),
            NumberWithFormat("##############").fake_with_rng(&mut self.rng),
            self.swift_code(),
            self.rng.gen_range(300..=850).to_string(),
            NumberWithFormat("###-##-####").fake_with_rng(&mut self.rng),
            self.driver_license(),
            NumberWithFormat("#########").fake_with_rng(&mut self.rng),
            format!("VTR{}", self.rng.gen_range(1_000_000..=9_999_999)),
            format!("H{}", self.rng.gen_range(100_000_000..=999_999_999)),
            IPv4().fake_with_rng(&mut self.rng),
            self.device_id(),
            profile_link,
            CompanyName().fake_with_rng(&mut self.rng),
            Profession().fake_with_rng(&mut self.rng),
            format!("EMP-{}", self.rng.gen_range(1000..=99999)),
        ]
    }

    fn date_of_birth(&mut self) -> String {
        let days = self.rng.gen_range(MIN_AGE_DAYS..=MAX_AGE_DAYS);
        let dob = self.today.saturating_sub(Span::new().days(days));
        dob.strftime("%Y-%m-%d").to_string()
    }

    /// Single-line postal address: street, city, state and zip.
    fn location(&mut self) -> String {
        let building: String = BuildingNumber().fake_with_rng(&mut self.rng);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        let suffix: String = StreetSuffix().fake_with_rng(&mut self.rng);
        let city: String = CityName().fake_with_rng(&mut self.rng);
        let state: String = StateAbbr().fake_with_rng(&mut self.rng);
        let zip: String = ZipCode().fake_with_rng(&mut self.rng);
        format!("{building} {street} {suffix}, {city}, {state} {zip}")
    }

    fn card_expiry(&mut self) -> String {
        let months = self.rng.gen_range(1..=120);
        let expiry = self.today.saturating_add(Span::new().months(months));
        expiry.strftime("%m/%y").to_string()
    }

    /// 11-character SWIFT/BIC: six letters, then five letters or digits.
    fn swift_code(&mut self) -> String {
        let mut code = String::with_capacity(11);
        for _ in 0..6 {
            code.push(UPPER[self.rng.gen_range(0..UPPER.len())] as char);
        }
        for _ in 0..5 {
            code.push(UPPER_ALNUM[self.rng.gen_range(0..UPPER_ALNUM.len())] as char);
        }
        code
    }

    fn driver_license(&mut self) -> String {
        let letter = UPPER[self.rng.gen_range(0..UPPER.len())] as char;
        format!("{letter}{:07}", self.rng.gen_range(0..10_000_000))
    }

    /// Random UUIDv4 rendered in the canonical hyphenated form.
    fn device_id(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        uuid::Uuid::from_bytes(bytes).to_string()
    }

    fn choose(&mut self, options: &[&str]) -> String {
        options[self.rng.gen_range(0..options.len())].to_string()
    }
}
