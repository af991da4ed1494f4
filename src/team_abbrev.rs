/// Map a team abbreviation to its full team name
///
/// The schedule and landing payloads reliably carry the 3-letter
/// abbreviation, while the localized place/common name pair is one of
/// the fields that comes and goes. The detail view and CLI fall back to
/// this table.
pub fn abbrev_to_team_name(abbrev: &str) -> Option<&'static str> {
    match abbrev {
        "ANA" => Some("Anaheim Ducks"),
        "BOS" => Some("Boston Bruins"),
        "BUF" => Some("Buffalo Sabres"),
        "CGY" => Some("Calgary Flames"),
        "CAR" => Some("Carolina Hurricanes"),
        "CHI" => Some("Chicago Blackhawks"),
        "COL" => Some("Colorado Avalanche"),
        "CBJ" => Some("Columbus Blue Jackets"),
        "DAL" => Some("Dallas Stars"),
        "DET" => Some("Detroit Red Wings"),
        "EDM" => Some("Edmonton Oilers"),
        "FLA" => Some("Florida Panthers"),
        "LAK" => Some("Los Angeles Kings"),
        "MIN" => Some("Minnesota Wild"),
        "MTL" => Some("Montreal Canadiens"),
        "NSH" => Some("Nashville Predators"),
        "NJD" => Some("New Jersey Devils"),
        "NYI" => Some("New York Islanders"),
        "NYR" => Some("New York Rangers"),
        "OTT" => Some("Ottawa Senators"),
        "PHI" => Some("Philadelphia Flyers"),
        "PIT" => Some("Pittsburgh Penguins"),
        "SJS" => Some("San Jose Sharks"),
        "SEA" => Some("Seattle Kraken"),
        "STL" => Some("St. Louis Blues"),
        "TBL" => Some("Tampa Bay Lightning"),
        "TOR" => Some("Toronto Maple Leafs"),
        "UTA" => Some("Utah Hockey Club"),
        "VAN" => Some("Vancouver Canucks"),
        "VGK" => Some("Vegas Golden Knights"),
        "WSH" => Some("Washington Capitals"),
        "WPG" => Some("Winnipeg Jets"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_abbreviations() {
        assert_eq!(abbrev_to_team_name("TOR"), Some("Toronto Maple Leafs"));
        assert_eq!(abbrev_to_team_name("VGK"), Some("Vegas Golden Knights"));
    }

    #[test]
    fn test_unknown_abbreviation() {
        assert_eq!(abbrev_to_team_name("XXX"), None);
        assert_eq!(abbrev_to_team_name(""), None);
    }
}
