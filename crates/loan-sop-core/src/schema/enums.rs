use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declares a select-field domain: a closed set of labelled variants plus an
/// `Other` variant holding any label outside the domain. Serialises as the
/// label string so records round-trip with the front end unchanged.
macro_rules! select_domain {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A value outside the option list, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Option labels in display order.
            pub const OPTIONS: &'static [&'static str] = &[$($label),+];

            pub fn label(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Other(s) => s.as_str(),
                }
            }

            /// True when the value is one of the fixed options.
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $($label => Self::$variant,)+
                    _ => Self::Other(s),
                }
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                match v {
                    $name::Other(s) => s,
                    known => known.label().to_string(),
                }
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

select_domain! {
    /// Loan program.
    LoanType {
        Conventional => "Conventional",
        Fha => "FHA",
        Va => "VA",
        Usda => "USDA",
        Jumbo => "Jumbo",
    }
}

select_domain! {
    PropertyType {
        SingleFamily => "Single Family",
        Condo => "Condo",
        Townhouse => "Townhouse",
        MultiFamily => "Multi-Family",
        Commercial => "Commercial",
    }
}

select_domain! {
    /// Overall underwriting risk rating.
    RiskRating {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        VeryHigh => "Very High",
    }
}

select_domain! {
    /// Final underwriting decision.
    Decision {
        Approved => "Approved",
        Denied => "Denied",
        Conditional => "Conditional",
        CounterOffer => "Counter Offer",
    }
}

select_domain! {
    PaymentSchedule {
        Monthly => "Monthly",
        BiWeekly => "Bi-weekly",
        Weekly => "Weekly",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_parse_to_variants() {
        assert_eq!(RiskRating::from("Very High".to_string()), RiskRating::VeryHigh);
        assert_eq!(Decision::from("Counter Offer".to_string()), Decision::CounterOffer);
        assert_eq!(PaymentSchedule::from("Bi-weekly".to_string()), PaymentSchedule::BiWeekly);
        assert_eq!("FHA".parse::<LoanType>().unwrap(), LoanType::Fha);
    }

    #[test]
    fn test_unknown_label_is_kept_verbatim() {
        let v = RiskRating::from("Extreme".to_string());
        assert_eq!(v, RiskRating::Other("Extreme".into()));
        assert!(!v.is_known());
        assert_eq!(v.label(), "Extreme");
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        // Option values are matched exactly, as a <select> would submit them.
        assert!(!LoanType::from("fha".to_string()).is_known());
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&PropertyType::MultiFamily).unwrap();
        assert_eq!(json, "\"Multi-Family\"");
        let back: PropertyType = serde_json::from_str("\"Condo\"").unwrap();
        assert_eq!(back, PropertyType::Condo);
    }

    #[test]
    fn test_options_match_display_order() {
        assert_eq!(
            Decision::OPTIONS,
            &["Approved", "Denied", "Conditional", "Counter Offer"]
        );
        assert_eq!(LoanType::OPTIONS.len(), 5);
        for label in RiskRating::OPTIONS {
            assert_eq!(RiskRating::from(label.to_string()).to_string(), *label);
        }
    }
}
