//! Countries the academy serves.
//!
//! Each country maps to the currency its prices are quoted in. The table order
//! is the order the country menu shows them.

/// A country the user can pick from the first menu.
#[derive(Debug, PartialEq, Eq)]
pub struct Country {
    /// Short code used in callback payloads (`country_<code>`).
    pub code: &'static str,
    /// Display name echoed back to the user and the admin.
    pub name: &'static str,
    /// Button label, flag included.
    pub label: &'static str,
    /// ISO currency code prices are converted to.
    pub currency: &'static str,
}

/// All supported countries, in menu order.
pub static COUNTRIES: [Country; 7] = [
    Country {
        code: "uk",
        name: "UK",
        label: "🇬🇧 UK",
        currency: "GBP",
    },
    Country {
        code: "kw",
        name: "Kuwait",
        label: "🇰🇼 Kuwait",
        currency: "KWD",
    },
    Country {
        code: "ae",
        name: "United Arab Emirates",
        label: "🇦🇪 UAE",
        currency: "AED",
    },
    Country {
        code: "sa",
        name: "Saudi Arabia",
        label: "🇸🇦 Saudi Arabia",
        currency: "SAR",
    },
    Country {
        code: "qa",
        name: "Qatar",
        label: "🇶🇦 Qatar",
        currency: "QAR",
    },
    Country {
        code: "us",
        name: "USA",
        label: "🇺🇸 USA",
        currency: "USD",
    },
    Country {
        code: "ca",
        name: "Canada",
        label: "🇨🇦 Canada",
        currency: "CAD",
    },
];

/// Look up a country by its code.
#[must_use]
pub fn find_country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_country() {
        let kw = find_country("kw").expect("kw is in the table");
        assert_eq!(kw.name, "Kuwait");
        assert_eq!(kw.currency, "KWD");
    }

    #[test]
    fn test_find_is_case_sensitive() {
        assert!(find_country("UK").is_none());
        assert!(find_country("").is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in COUNTRIES.iter().enumerate() {
            for b in COUNTRIES.iter().skip(i + 1) {
                assert_ne!(a.code, b.code);
            }
        }
    }
}
