//! The enumerated currency set. Fixed for the process lifetime; selecting a
//! code outside this table is ignored by the context.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const CURRENCIES: &[Currency] = &[
    Currency { code: "USD", symbol: "$", name: "US Dollar" },
    Currency { code: "EUR", symbol: "€", name: "Euro" },
    Currency { code: "GBP", symbol: "£", name: "British Pound" },
    Currency { code: "JPY", symbol: "¥", name: "Japanese Yen" },
    Currency { code: "CHF", symbol: "CHF", name: "Swiss Franc" },
    Currency { code: "CAD", symbol: "C$", name: "Canadian Dollar" },
    Currency { code: "AUD", symbol: "A$", name: "Australian Dollar" },
    Currency { code: "CNY", symbol: "¥", name: "Chinese Yuan" },
    Currency { code: "INR", symbol: "₹", name: "Indian Rupee" },
    Currency { code: "PLN", symbol: "zł", name: "Polish Zloty" },
    Currency { code: "BRL", symbol: "R$", name: "Brazilian Real" },
    Currency { code: "ZAR", symbol: "R", name: "South African Rand" },
];

pub const DEFAULT_CODE: &str = "USD";

/// Case-insensitive lookup; `None` for anything outside the table.
pub fn find(code: &str) -> Option<&'static Currency> {
    let code = code.to_uppercase();
    CURRENCIES.iter().find(|c| c.code == code)
}

pub fn default_currency() -> &'static Currency {
    find(DEFAULT_CODE).unwrap_or(&CURRENCIES[0])
}
