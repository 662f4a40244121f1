mod currency_format;

pub use currency_format::{
    CurrencyFormat, CurrencyFormatError, CurrencyLocale, OVERFLOW_DIGITS, SymbolPosition,
    UNDEFINED_DISPLAY,
};
