use strum::{AsRefStr, Display, EnumString, VariantArray};

pub const EMAIL_HREF: &str =
    "mailto:contact@prestigia-agency.com?subject=Demande%20d'information%20-%20Prestigia%20Agency";
pub const CALL_HREF: &str =
    "https://wa.me/212652768993?text=Bonjour%20Je%20veux%20plus%20d'informations";
pub const LOCATION_HREF: &str =
    "https://maps.google.com/?q=Bld+Qods+The+Gold+Center+Casablanca+Ain+Chock";

/// A card of the contact section that sends the visitor somewhere else.
#[derive(
    EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "lowercase")]
pub enum Affordance {
    Email,
    Call,
    Location,
}

impl Affordance {
    pub fn href(&self) -> &'static str {
        match self {
            Affordance::Email => EMAIL_HREF,
            Affordance::Call => CALL_HREF,
            Affordance::Location => LOCATION_HREF,
        }
    }

    /// Text printed under the card title.
    pub fn detail(&self) -> &'static str {
        match self {
            Affordance::Email => "contact@prestigia-agency.com",
            Affordance::Call => "+212 652 768 993",
            Affordance::Location => {
                "Bld Qods - The Gold Center, Étage 1, Bureau 2, Casablanca Ain Chock"
            }
        }
    }

    pub fn navigate(&self) -> Navigation {
        Navigation { uri: self.href() }
    }
}

/// A browser navigation requested by an affordance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub uri: &'static str,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn affordance_from_path_segment() {
        assert_eq!(Affordance::from_str("email").ok(), Some(Affordance::Email));
        assert_eq!(Affordance::from_str("call").ok(), Some(Affordance::Call));
        assert_eq!(
            Affordance::from_str("location").ok(),
            Some(Affordance::Location)
        );
        assert!(Affordance::from_str("fax").is_err());
    }

    #[test]
    fn every_affordance_has_a_distinct_href() {
        let hrefs = Affordance::VARIANTS
            .iter()
            .map(Affordance::href)
            .collect::<Vec<_>>();

        assert_eq!(hrefs, vec![EMAIL_HREF, CALL_HREF, LOCATION_HREF]);
        assert_eq!(Affordance::Call.to_string(), "call");
    }
}
