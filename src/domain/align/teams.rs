//! Built-in team alias tables for the major US leagues.
//!
//! Each entry maps a canonical team code to the surface forms providers use
//! for it. Lookup is normalized (case- and punctuation-insensitive), so the
//! alias lists only need one spelling per distinct wording.

type AliasRows = &'static [(&'static str, &'static [&'static str])];

pub(super) fn nfl() -> AliasRows {
    &[
        ("ARI", &["Arizona Cardinals", "Cardinals"]),
        ("ATL", &["Atlanta Falcons", "Falcons"]),
        ("BAL", &["Baltimore Ravens", "Ravens"]),
        ("BUF", &["Buffalo Bills", "Bills"]),
        ("CAR", &["Carolina Panthers", "Panthers"]),
        ("CHI", &["Chicago Bears", "Bears"]),
        ("CIN", &["Cincinnati Bengals", "Bengals"]),
        ("CLE", &["Cleveland Browns", "Browns"]),
        ("DAL", &["Dallas Cowboys", "Cowboys"]),
        ("DEN", &["Denver Broncos", "Broncos"]),
        ("DET", &["Detroit Lions", "Lions"]),
        ("GB", &["Green Bay Packers", "Packers", "Green Bay"]),
        ("HOU", &["Houston Texans", "Texans"]),
        ("IND", &["Indianapolis Colts", "Colts"]),
        ("JAX", &["Jacksonville Jaguars", "Jaguars", "Jags"]),
        ("KC", &["Kansas City Chiefs", "Chiefs", "Kansas City"]),
        ("LV", &["Las Vegas Raiders", "Raiders", "Las Vegas"]),
        ("LAC", &["Los Angeles Chargers", "Chargers", "LA Chargers"]),
        ("LAR", &["Los Angeles Rams", "Rams", "LA Rams"]),
        ("MIA", &["Miami Dolphins", "Dolphins"]),
        ("MIN", &["Minnesota Vikings", "Vikings"]),
        ("NE", &["New England Patriots", "Patriots", "Pats"]),
        ("NO", &["New Orleans Saints", "Saints"]),
        ("NYG", &["New York Giants", "NY Giants", "Giants"]),
        ("NYJ", &["New York Jets", "NY Jets", "Jets"]),
        ("PHI", &["Philadelphia Eagles", "Eagles"]),
        ("PIT", &["Pittsburgh Steelers", "Steelers"]),
        ("SF", &["San Francisco 49ers", "49ers", "Niners"]),
        ("SEA", &["Seattle Seahawks", "Seahawks"]),
        ("TB", &["Tampa Bay Buccaneers", "Buccaneers", "Bucs", "Tampa Bay"]),
        ("TEN", &["Tennessee Titans", "Titans"]),
        ("WAS", &["Washington Commanders", "Commanders"]),
    ]
}

pub(super) fn mlb() -> AliasRows {
    &[
        ("LAA", &["Los Angeles Angels", "Angels", "LA Angels"]),
        ("HOU", &["Houston Astros", "Astros"]),
        ("OAK", &["Oakland Athletics", "Athletics", "A's"]),
        ("TOR", &["Toronto Blue Jays", "Blue Jays", "Jays"]),
        ("ATL", &["Atlanta Braves", "Braves"]),
        ("MIL", &["Milwaukee Brewers", "Brewers"]),
        ("STL", &["St. Louis Cardinals", "Cardinals", "St Louis Cardinals"]),
        ("CHC", &["Chicago Cubs", "Cubs"]),
        ("ARI", &["Arizona Diamondbacks", "Diamondbacks", "D-backs"]),
        ("COL", &["Colorado Rockies", "Rockies"]),
        ("LAD", &["Los Angeles Dodgers", "Dodgers", "LA Dodgers"]),
        ("SD", &["San Diego Padres", "Padres"]),
        ("SF", &["San Francisco Giants", "Giants", "SF Giants"]),
        ("MIA", &["Miami Marlins", "Marlins"]),
        ("NYM", &["New York Mets", "Mets", "NY Mets"]),
        ("PHI", &["Philadelphia Phillies", "Phillies"]),
        ("PIT", &["Pittsburgh Pirates", "Pirates"]),
        ("WSH", &["Washington Nationals", "Nationals", "Nats"]),
        ("CWS", &["Chicago White Sox", "White Sox"]),
        ("CLE", &["Cleveland Guardians", "Guardians"]),
        ("DET", &["Detroit Tigers", "Tigers"]),
        ("KC", &["Kansas City Royals", "Royals"]),
        ("MIN", &["Minnesota Twins", "Twins", "Minnesota"]),
        ("NYY", &["New York Yankees", "Yankees", "NY Yankees", "Yanks"]),
        ("BAL", &["Baltimore Orioles", "Orioles", "O's"]),
        ("BOS", &["Boston Red Sox", "Red Sox"]),
        ("TB", &["Tampa Bay Rays", "Rays"]),
        ("TEX", &["Texas Rangers", "Rangers"]),
        ("SEA", &["Seattle Mariners", "Mariners"]),
    ]
}

pub(super) fn nba() -> AliasRows {
    &[
        ("ATL", &["Atlanta Hawks", "Hawks"]),
        ("BOS", &["Boston Celtics", "Celtics"]),
        ("BKN", &["Brooklyn Nets", "Nets"]),
        ("CHA", &["Charlotte Hornets", "Hornets"]),
        ("CHI", &["Chicago Bulls", "Bulls"]),
        ("CLE", &["Cleveland Cavaliers", "Cavaliers", "Cavs"]),
        ("DAL", &["Dallas Mavericks", "Mavericks", "Mavs"]),
        ("DEN", &["Denver Nuggets", "Nuggets"]),
        ("DET", &["Detroit Pistons", "Pistons"]),
        ("GSW", &["Golden State Warriors", "Warriors", "Golden State"]),
        ("HOU", &["Houston Rockets", "Rockets"]),
        ("IND", &["Indiana Pacers", "Pacers"]),
        ("LAC", &["Los Angeles Clippers", "Clippers", "LA Clippers"]),
        ("LAL", &["Los Angeles Lakers", "Lakers", "LA Lakers"]),
        ("MEM", &["Memphis Grizzlies", "Grizzlies"]),
        ("MIA", &["Miami Heat", "Heat"]),
        ("MIL", &["Milwaukee Bucks", "Bucks"]),
        ("MIN", &["Minnesota Timberwolves", "Timberwolves", "Wolves"]),
        ("NOP", &["New Orleans Pelicans", "Pelicans"]),
        ("NYK", &["New York Knicks", "Knicks", "NY Knicks"]),
        ("OKC", &["Oklahoma City Thunder", "Thunder", "Oklahoma City"]),
        ("ORL", &["Orlando Magic", "Magic"]),
        ("PHI", &["Philadelphia 76ers", "76ers", "Sixers"]),
        ("PHX", &["Phoenix Suns", "Suns"]),
        ("POR", &["Portland Trail Blazers", "Trail Blazers", "Blazers"]),
        ("SAC", &["Sacramento Kings", "Kings"]),
        ("SAS", &["San Antonio Spurs", "Spurs", "San Antonio"]),
        ("TOR", &["Toronto Raptors", "Raptors"]),
        ("UTA", &["Utah Jazz", "Jazz", "Utah"]),
        ("WAS", &["Washington Wizards", "Wizards"]),
    ]
}

pub(super) fn nhl() -> AliasRows {
    &[
        ("ANA", &["Anaheim Ducks", "Ducks"]),
        ("BOS", &["Boston Bruins", "Bruins"]),
        ("BUF", &["Buffalo Sabres", "Sabres"]),
        ("CGY", &["Calgary Flames", "Flames"]),
        ("CAR", &["Carolina Hurricanes", "Hurricanes", "Canes"]),
        ("CHI", &["Chicago Blackhawks", "Blackhawks"]),
        ("COL", &["Colorado Avalanche", "Avalanche", "Avs"]),
        ("CBJ", &["Columbus Blue Jackets", "Blue Jackets"]),
        ("DAL", &["Dallas Stars", "Stars"]),
        ("DET", &["Detroit Red Wings", "Red Wings", "Wings"]),
        ("EDM", &["Edmonton Oilers", "Oilers"]),
        ("FLA", &["Florida Panthers", "Panthers"]),
        ("LAK", &["Los Angeles Kings", "Kings", "LA Kings"]),
        ("MIN", &["Minnesota Wild", "Wild"]),
        ("MTL", &["Montreal Canadiens", "Canadiens", "Habs"]),
        ("NSH", &["Nashville Predators", "Predators", "Preds"]),
        ("NJD", &["New Jersey Devils", "Devils"]),
        ("NYI", &["New York Islanders", "Islanders", "Isles"]),
        ("NYR", &["New York Rangers", "Rangers"]),
        ("OTT", &["Ottawa Senators", "Senators", "Sens"]),
        ("PHI", &["Philadelphia Flyers", "Flyers"]),
        ("PIT", &["Pittsburgh Penguins", "Penguins", "Pens"]),
        ("SJS", &["San Jose Sharks", "Sharks"]),
        ("SEA", &["Seattle Kraken", "Kraken"]),
        ("STL", &["St. Louis Blues", "Blues", "St Louis Blues"]),
        ("TBL", &["Tampa Bay Lightning", "Lightning", "Bolts"]),
        ("TOR", &["Toronto Maple Leafs", "Maple Leafs", "Leafs"]),
        ("VAN", &["Vancouver Canucks", "Canucks"]),
        ("VGK", &["Vegas Golden Knights", "Golden Knights", "Vegas"]),
        ("WSH", &["Washington Capitals", "Capitals", "Caps"]),
        ("WPG", &["Winnipeg Jets", "Jets"]),
    ]
}
