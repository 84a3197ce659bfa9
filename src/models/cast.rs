use chrono::NaiveDate;
use serde::Deserialize;

use super::movie::image_url;

/// Cast size kept when the upstream credits are long enough
pub const FULL_CAST_SIZE: usize = 10;
/// Cast size kept otherwise
pub const SHORT_CAST_SIZE: usize = 5;

pub type PersonId = u64;

// ============================================================================
// Upstream credit and person types
// ============================================================================

/// Response of the `/MovieCastes` relay
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCredits {
    #[serde(default)]
    pub cast: Vec<ApiCastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCastMember {
    pub id: PersonId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Response of the `/CastesDetails` relay
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiPerson {
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
}

// ============================================================================
// Client-side records
// ============================================================================

/// Top-billed cast, stored as index-aligned columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cast {
    pub ids: Vec<PersonId>,
    pub names: Vec<String>,
    pub characters: Vec<String>,
    pub profiles: Vec<String>,
}

impl Cast {
    /// Builds the cast from upstream credits, keeping ten members when at
    /// least ten are billed and at most five otherwise
    pub fn from_credits(credits: ApiCredits, image_base_url: &str) -> Self {
        let keep = cast_size(credits.cast.len());
        let mut cast = Cast::default();

        for member in credits.cast.into_iter().take(keep) {
            cast.ids.push(member.id);
            cast.names.push(member.name);
            cast.characters.push(member.character);
            cast.profiles.push(image_url(image_base_url, member.profile_path.as_deref()));
        }

        cast
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Number of cast members kept for a credits list of the given length
pub fn cast_size(available: usize) -> usize {
    if available >= FULL_CAST_SIZE {
        FULL_CAST_SIZE
    } else {
        available.min(SHORT_CAST_SIZE)
    }
}

/// Per-actor biographical columns, index-aligned with [`Cast`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CastBiographies {
    pub birthdays: Vec<String>,
    pub biographies: Vec<String>,
    pub places_of_birth: Vec<String>,
}

impl CastBiographies {
    pub fn push(&mut self, person: ApiPerson) {
        let birthday = person.birthday.as_deref().map(format_birthday);
        self.birthdays.push(birthday.unwrap_or_default());
        self.biographies.push(person.biography.unwrap_or_default());
        self.places_of_birth.push(person.place_of_birth.unwrap_or_default());
    }

    pub fn len(&self) -> usize {
        self.birthdays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.birthdays.is_empty()
    }
}

impl FromIterator<ApiPerson> for CastBiographies {
    fn from_iter<I: IntoIterator<Item = ApiPerson>>(iter: I) -> Self {
        let mut bios = CastBiographies::default();
        for person in iter {
            bios.push(person);
        }
        bios
    }
}

/// Formats an ISO birthday ("1974-07-30") for display ("Jul 30 1974").
/// Unparseable dates yield an empty string.
pub fn format_birthday(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.format("%b %d %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/original";

    fn credits(count: usize) -> ApiCredits {
        ApiCredits {
            cast: (0..count)
                .map(|i| ApiCastMember {
                    id: i as PersonId + 1,
                    name: format!("Actor {}", i),
                    character: format!("Role {}", i),
                    profile_path: Some(format!("/p{}.jpg", i)),
                })
                .collect(),
        }
    }

    #[test]
    fn test_cast_size_rule() {
        assert_eq!(cast_size(25), 10);
        assert_eq!(cast_size(10), 10);
        assert_eq!(cast_size(9), 5);
        assert_eq!(cast_size(5), 5);
        assert_eq!(cast_size(3), 3);
        assert_eq!(cast_size(0), 0);
    }

    #[test]
    fn test_cast_from_long_credits_keeps_ten() {
        let cast = Cast::from_credits(credits(14), IMAGE_BASE);
        assert_eq!(cast.len(), 10);
        assert_eq!(cast.ids.first(), Some(&1));
        assert_eq!(cast.ids.last(), Some(&10));
    }

    #[test]
    fn test_cast_from_short_credits_keeps_five() {
        let cast = Cast::from_credits(credits(7), IMAGE_BASE);
        assert_eq!(cast.len(), 5);
        assert_eq!(cast.names.len(), 5);
        assert_eq!(cast.characters.len(), 5);
        assert_eq!(cast.profiles.len(), 5);
        assert_eq!(cast.profiles[0], "https://image.tmdb.org/t/p/original/p0.jpg");
    }

    #[test]
    fn test_cast_columns_stay_aligned() {
        let cast = Cast::from_credits(credits(3), IMAGE_BASE);
        assert_eq!(cast.len(), 3);
        for i in 0..cast.len() {
            assert_eq!(cast.names[i], format!("Actor {}", i));
            assert_eq!(cast.characters[i], format!("Role {}", i));
            assert_eq!(cast.ids[i], i as PersonId + 1);
        }
    }

    #[test]
    fn test_format_birthday() {
        assert_eq!(format_birthday("1974-07-30"), "Jul 30 1974");
        assert_eq!(format_birthday("1956-01-05"), "Jan 05 1956");
        assert_eq!(format_birthday("unknown"), "");
    }

    #[test]
    fn test_person_deserialization_with_nulls() {
        let json = r#"{
            "birthday": null,
            "biography": "Born in Hollywood.",
            "place_of_birth": null
        }"#;

        let person: ApiPerson = serde_json::from_str(json).unwrap();
        let bios: CastBiographies = std::iter::once(person).collect();

        assert_eq!(bios.birthdays, vec![""]);
        assert_eq!(bios.biographies, vec!["Born in Hollywood."]);
        assert_eq!(bios.places_of_birth, vec![""]);
    }
}
