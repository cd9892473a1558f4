use crate::data_retrieval::api::StatsApi;
use crate::data_retrieval::identity::{build_duo_set, resolve_player};
use crate::data_retrieval::match_scanner::validate_scan_depth;
use crate::error::DuoError;
use crate::match_stats::{DuoSet, PlayerIdentity};
use crate::types::Region;
use std::io::{self, BufRead, Write};

/// Collects search input, asking again until the answer is usable.
/// Every `ask_*` returns `Ok(None)` once the input is closed, which the
/// caller treats as a cancelled search.
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// One line of input without its line ending, `None` at end of input.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn show_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "Error: {}", message)
    }

    /// Uses `preset` as the first answer, if any.
    fn answer(&mut self, preset: &mut Option<String>, question: &str) -> io::Result<Option<String>> {
        match preset.take() {
            Some(value) => Ok(Some(value)),
            None => self.ask(question),
        }
    }

    pub async fn ask_player<A: StatsApi + ?Sized>(
        &mut self,
        api: &A,
        region: &Region,
        mut preset: Option<String>,
    ) -> io::Result<Option<PlayerIdentity>> {
        loop {
            let name = match self.answer(&mut preset, "Enter your summoner name")? {
                Some(name) => name,
                None => return Ok(None),
            };
            match resolve_player(api, region, &name).await {
                Ok(player) => return Ok(Some(player)),
                Err(DuoError::EmptyInput) => self.show_error("Please enter a summoner name!")?,
                Err(DuoError::NotFound(_)) => {
                    self.show_error("Could not find summoner. Please try again")?
                }
                Err(e) => {
                    warn!("Summoner lookup failed: {}", e);
                    self.show_error(&format!("Summoner lookup failed ({}). Please try again", e))?
                }
            }
        }
    }

    pub async fn ask_duos<A: StatsApi + ?Sized>(
        &mut self,
        api: &A,
        region: &Region,
        mut preset: Option<String>,
    ) -> io::Result<Option<DuoSet>> {
        loop {
            let names = match self.answer(
                &mut preset,
                "Enter your duos' summoner names (e.g. summonerOne,summonerTwo)",
            )? {
                Some(names) => names,
                None => return Ok(None),
            };
            match build_duo_set(api, region, &names).await {
                Ok(duos) => return Ok(Some(duos)),
                Err(DuoError::EmptyInput) => {
                    self.show_error("Please enter one or more summoner names!")?
                }
                Err(DuoError::NotFound(_)) => {
                    self.show_error("One of the summoner names was not correct. Try again")?
                }
                Err(e @ DuoError::DuoCountMismatch { .. }) => {
                    error!("Duo resolution broke its invariant: {}", e);
                    self.show_error("There was an internal error. Please try again")?
                }
                Err(e) => {
                    warn!("Duo lookup failed: {}", e);
                    self.show_error(&format!("Duo lookup failed ({}). Please try again", e))?
                }
            }
        }
    }

    pub fn ask_games(
        &mut self,
        page_size: usize,
        mut preset: Option<String>,
    ) -> io::Result<Option<usize>> {
        loop {
            let raw = match self.answer(&mut preset, "How many games back should be searched?")? {
                Some(raw) => raw,
                None => return Ok(None),
            };
            let games = match raw.trim().parse::<usize>() {
                Ok(games) => games,
                Err(_) => {
                    self.show_error("Please enter a number!")?;
                    continue;
                }
            };
            match validate_scan_depth(games, page_size) {
                Ok(games) => return Ok(Some(games)),
                Err(_) => self.show_error(&format!("Please enter a multiple of {}!", page_size))?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{player, FakeApi};
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn region() -> Region {
        "na1".to_string()
    }

    #[test]
    fn ask_strips_line_ending() {
        let mut p = prompter("Alice\r\n");
        assert_eq!(Some("Alice".to_string()), p.ask("name").unwrap());
        assert_eq!(None, p.ask("name").unwrap());
    }

    #[test]
    fn games_reprompt_until_valid() {
        let mut p = prompter("abc\n150\n0\n300\n");
        assert_eq!(Some(300), p.ask_games(100, None).unwrap());
        let out = String::from_utf8(p.output).unwrap();
        assert!(out.contains("Please enter a number!"));
        assert_eq!(2, out.matches("Please enter a multiple of 100!").count());
    }

    #[test]
    fn games_cancelled_at_end_of_input() {
        let mut p = prompter("42\n");
        assert_eq!(None, p.ask_games(100, None).unwrap());
    }

    #[test]
    fn games_preset_is_used_first() {
        let mut p = prompter("");
        assert_eq!(Some(200), p.ask_games(100, Some("200".to_string())).unwrap());
    }

    #[tokio::test]
    async fn player_reprompts_after_not_found() {
        let api = FakeApi::new().with_player(player("Alice"));
        let mut p = prompter("\nGhost\nAlice\n");
        let found = p.ask_player(&api, &region(), None).await.unwrap();
        assert_eq!(Some(player("Alice")), found);
        assert_eq!(2, api.lookup_calls());
        let out = String::from_utf8(p.output).unwrap();
        assert!(out.contains("Please enter a summoner name!"));
        assert!(out.contains("Could not find summoner."));
    }

    #[tokio::test]
    async fn duos_from_preset_then_prompt() {
        let api = FakeApi::new()
            .with_player(player("Alice"))
            .with_player(player("Bob"));
        let mut p = prompter("Alice,Bob\n");
        let duos = p
            .ask_duos(&api, &region(), Some("Alice,Carl".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!("Alice\nBob", duos.display_names());
        let out = String::from_utf8(p.output).unwrap();
        assert!(out.contains("One of the summoner names was not correct."));
    }

    #[tokio::test]
    async fn duos_cancelled() {
        let api = FakeApi::new();
        let mut p = prompter("");
        assert!(p.ask_duos(&api, &region(), None).await.unwrap().is_none());
        assert_eq!(0, api.lookup_calls());
    }
}
