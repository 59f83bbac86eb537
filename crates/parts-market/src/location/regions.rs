//! Static catalog of Iraq's provinces and their main cities.

/// Province name paired with its cities.
type Region = (&'static str, &'static [&'static str]);

const REGIONS: &[Region] = &[
    (
        "Baghdad",
        &[
            "Baghdad",
            "Al-Karkh",
            "Al-Rusafa",
            "Al-Mansour",
            "Al-Karrada",
            "Al-Jadriya",
            "Al-Adhamiya",
            "Al-Kadhimiya",
            "Al-Sadr City",
        ],
    ),
    (
        "Basra",
        &["Basra", "Al-Zubair", "Al-Faw", "Abu Al-Khasib", "Al-Qurna", "Shatt Al-Arab"],
    ),
    (
        "Nineveh",
        &["Mosul", "Tal Afar", "Sinjar", "Al-Hamdaniya", "Al-Shikhan", "Al-Ba'aj"],
    ),
    (
        "Erbil",
        &["Erbil", "Soran", "Koisanjaq", "Mergasur", "Choman", "Rawanduz"],
    ),
    (
        "Sulaymaniyah",
        &["Sulaymaniyah", "Halabja", "Ranya", "Darbandikhan", "Kalar", "Dukan"],
    ),
    (
        "Dohuk",
        &["Dohuk", "Zakho", "Amedi", "Sumel", "Bardarash", "Al-Shikhan"],
    ),
    (
        "Kirkuk",
        &["Kirkuk", "Al-Hawija", "Dibis", "Al-Rashad", "Al-Daquq", "Al-Zab"],
    ),
    (
        "Anbar",
        &["Ramadi", "Fallujah", "Al-Qaim", "Hit", "Haditha", "Rutba"],
    ),
    (
        "Karbala",
        &["Karbala", "Al-Hindiya", "Ain Al-Tamr", "Al-Mahawil"],
    ),
    (
        "Najaf",
        &["Najaf", "Al-Kufa", "Al-Manathera", "Al-Mishkhab", "Al-Qadisiyyah"],
    ),
    (
        "Babil",
        &["Hillah", "Al-Mahawil", "Al-Musayyib", "Al-Hashimiya", "Al-Qasim"],
    ),
    (
        "Wasit",
        &["Kut", "Al-Suwaira", "Al-Aziziyah", "Al-Nu'maniya", "Al-Badra"],
    ),
    (
        "Diyala",
        &["Baqubah", "Al-Khalis", "Al-Muqdadiya", "Khanaqin", "Al-Saadiya"],
    ),
    (
        "Maysan",
        &["Amarah", "Al-Kahla", "Al-Maimouna", "Al-Majar Al-Kabir", "Al-Salam"],
    ),
    (
        "Muthanna",
        &["Samawah", "Al-Rumaitha", "Al-Salman", "Al-Khidhir", "Al-Samawa"],
    ),
    (
        "Qadisiyyah",
        &["Diwaniyah", "Al-Shamiya", "Al-Hamza", "Al-Diwaniyah", "Al-Afaq"],
    ),
    (
        "Dhi Qar",
        &["Nasiriyah", "Al-Rifai", "Al-Shatra", "Al-Nasir", "Al-Chibayish"],
    ),
];

/// All provinces, in catalog order.
pub fn provinces() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().map(|(province, _)| *province)
}

/// Cities of `province`. Unknown provinces have no cities.
pub fn cities_of(province: &str) -> &'static [&'static str] {
    REGIONS
        .iter()
        .find(|(name, _)| *name == province)
        .map(|(_, cities)| *cities)
        .unwrap_or(&[])
}

pub fn is_known_province(province: &str) -> bool {
    REGIONS.iter().any(|(name, _)| *name == province)
}

/// Whether `city` is listed under `province`. Exact match.
pub fn is_valid_city_for_province(city: &str, province: &str) -> bool {
    cities_of(province).contains(&city)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seventeen_provinces() {
        let all: Vec<_> = provinces().collect();
        assert_eq!(all.len(), 17);
        assert_eq!(all[0], "Baghdad");
        assert_eq!(all[16], "Dhi Qar");
    }

    #[test]
    fn test_cities_of() {
        assert!(cities_of("Baghdad").contains(&"Al-Karrada"));
        assert_eq!(cities_of("Karbala").len(), 4);
        assert!(cities_of("Atlantis").is_empty());
        assert!(cities_of("baghdad").is_empty());
    }

    #[test]
    fn test_city_validation() {
        assert!(is_valid_city_for_province("Mosul", "Nineveh"));
        assert!(!is_valid_city_for_province("Mosul", "Baghdad"));
        assert!(is_valid_city_for_province("Al-Shikhan", "Dohuk"));
        assert!(is_known_province("Dhi Qar"));
        assert!(!is_known_province("Dhi qar"));
    }
}
