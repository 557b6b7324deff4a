//! Supported city list

/// Cities with environmental coverage, sorted alphabetically
pub const SUPPORTED_CITIES: &[&str] = &[
    "Agra",
    "Ahmedabad",
    "Amritsar",
    "Bangalore",
    "Bhopal",
    "Chandigarh",
    "Chennai",
    "Coimbatore",
    "Delhi",
    "Goa",
    "Guwahati",
    "Hyderabad",
    "Indore",
    "Jaipur",
    "Kochi",
    "Kolkata",
    "Lucknow",
    "Ludhiana",
    "Madurai",
    "Mumbai",
    "Nagpur",
    "Nashik",
    "Patna",
    "Pune",
    "Rajkot",
    "Surat",
    "Thiruvananthapuram",
    "Vadodara",
    "Varanasi",
    "Visakhapatnam",
];

/// Resolve user input to the canonical city name (case-insensitive, trimmed)
pub fn resolve_city(input: &str) -> Option<&'static str> {
    let needle = input.trim();
    if needle.is_empty() {
        return None;
    }
    SUPPORTED_CITIES.iter().copied().find(|city| city.eq_ignore_ascii_case(needle))
}

/// Cities whose name starts with the given prefix (case-insensitive)
pub fn suggest_cities(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.trim().to_lowercase();
    SUPPORTED_CITIES
        .iter()
        .copied()
        .filter(|city| city.to_lowercase().starts_with(&prefix))
        .collect()
}
