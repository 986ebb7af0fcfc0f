use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of an advertisement, from the advertiser's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "BUY",
            TradeType::Sell => "SELL",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TradeType::Buy),
            "SELL" => Ok(TradeType::Sell),
            _ => Err(format!("Unknown trade type: {s} (expected BUY or SELL)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("buy".parse::<TradeType>().unwrap(), TradeType::Buy);
        assert_eq!(" SELL ".parse::<TradeType>().unwrap(), TradeType::Sell);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("HOLD".parse::<TradeType>().is_err());
        assert!("".parse::<TradeType>().is_err());
    }

    #[test]
    fn test_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TradeType::Sell).unwrap(), "\"SELL\"");
    }
}
