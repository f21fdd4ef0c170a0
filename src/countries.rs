use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub currency_code: &'static str,
    pub currency_symbol: &'static str,
}

pub const COUNTRIES: &[Country] = &[
    Country {
        code: "US",
        name: "United States",
        currency_code: "USD",
        currency_symbol: "$",
    },
    Country {
        code: "UK",
        name: "United Kingdom",
        currency_code: "GBP",
        currency_symbol: "£",
    },
    Country {
        code: "IN",
        name: "India",
        currency_code: "INR",
        currency_symbol: "₹",
    },
    Country {
        code: "CA",
        name: "Canada",
        currency_code: "CAD",
        currency_symbol: "CA$",
    },
    Country {
        code: "AU",
        name: "Australia",
        currency_code: "AUD",
        currency_symbol: "A$",
    },
    Country {
        code: "EU",
        name: "European Union",
        currency_code: "EUR",
        currency_symbol: "€",
    },
    Country {
        code: "JP",
        name: "Japan",
        currency_code: "JPY",
        currency_symbol: "¥",
    },
    Country {
        code: "SG",
        name: "Singapore",
        currency_code: "SGD",
        currency_symbol: "SGD ",
    },
];

pub fn find_country(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

pub fn currency_symbol(currency_code: &str) -> Option<&'static str> {
    let code = currency_code.trim();
    COUNTRIES
        .iter()
        .find(|c| c.currency_code.eq_ignore_ascii_case(code))
        .map(|c| c.currency_symbol)
}

/// Whole-unit amount with thousands separators, e.g. `-$1,235`.
/// Unknown currencies are prefixed with their code; an empty code means USD.
pub fn format_currency(amount: f64, currency_code: &str) -> String {
    let code = match currency_code.trim() {
        "" => "USD",
        code => code,
    };
    let prefix = match currency_symbol(code) {
        Some(symbol) => symbol.to_string(),
        None => format!("{} ", code.to_uppercase()),
    };

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{}{}{}", sign, prefix, group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
