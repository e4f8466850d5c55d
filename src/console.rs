use std::io::{self, Write};

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::advisor::{Advice, AdvisorConfig, Situation, advise};
use crate::cards::parse_cards;
use crate::ev::Action;
use crate::ledger::SessionLedger;
use crate::opponent::default_fold_prob;

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub trials: u32,
    pub seed: u64,
    pub no_color: bool,
    pub starting_bankroll: f32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            trials: crate::equity::DEFAULT_TRIALS,
            seed: crate::equity::DEFAULT_SEED,
            no_color: false,
            starting_bankroll: 0.0,
        }
    }
}

/// Interactive decision loop: prompt for a spot, print the advice, and
/// optionally log the realized outcome into the session ledger.
pub struct Console {
    config: ConsoleConfig,
    ledger: SessionLedger,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Self {
        let ledger = SessionLedger::new(config.starting_bankroll);
        Self { config, ledger }
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    pub fn run(&mut self) -> Result<()> {
        println!("Heads-up NLHE decision assistant. Enter 'q' at any prompt to quit.");

        let advisor = AdvisorConfig {
            trials: self.config.trials,
            seed: self.config.seed,
        };

        loop {
            let hero_line = match self.prompt("Hero cards (e.g. As Ks): ")? {
                Some(line) => line,
                None => break,
            };
            let hero = match parse_cards(&hero_line) {
                Ok(cards) => cards,
                Err(err) => {
                    println!("{err}. Try again.");
                    continue;
                }
            };

            let board_line = match self.prompt("Board (enter for none): ")? {
                Some(line) => line,
                None => break,
            };
            let board = match parse_cards(&board_line) {
                Ok(cards) => cards,
                Err(err) => {
                    println!("{err}. Try again.");
                    continue;
                }
            };

            let pot = match self.prompt_amount("Pot", 10.0)? {
                Some(value) => value,
                None => break,
            };
            let call_amount = match self.prompt_amount("Call amount", 5.0)? {
                Some(value) => value,
                None => break,
            };
            let raise_amount = match self.prompt_amount("Raise amount", 15.0)? {
                Some(value) => value,
                None => break,
            };
            let fold_prob = match self.prompt_amount("Rival fold probability", default_fold_prob())? {
                Some(value) => value,
                None => break,
            };

            let situation = Situation {
                hero,
                board,
                pot,
                call_amount,
                raise_amount,
                fold_prob,
            };

            let advice = match advise(&situation, &advisor) {
                Ok(advice) => advice,
                Err(err) => {
                    println!("{err}. Try again.");
                    continue;
                }
            };

            print_advice(&situation, &advice, self.config.no_color);

            if !self.log_outcome(&situation, &advice)? {
                break;
            }
        }

        self.print_summary();
        Ok(())
    }

    /// Returns false when the user quits mid-prompt.
    fn log_outcome(&mut self, situation: &Situation, advice: &Advice) -> Result<bool> {
        let line = match self.prompt("Realized result (+won/-lost, enter to skip logging): ")? {
            Some(line) => line,
            None => return Ok(false),
        };
        if line.is_empty() {
            return Ok(true);
        }
        let realized: f32 = match line.parse() {
            Ok(value) => value,
            Err(_) => {
                println!("Not a number; hand not logged.");
                return Ok(true);
            }
        };

        let prompt = format!("Action taken [f/c/r] (enter = {}): ", advice.recommended);
        let action = match self.prompt(&prompt)? {
            Some(line) => match line.as_str() {
                "" => advice.recommended,
                "f" | "fold" => Action::Fold,
                "c" | "call" => Action::Call,
                "r" | "raise" => Action::Raise,
                other => {
                    println!("Unknown action '{other}'; hand not logged.");
                    return Ok(true);
                }
            },
            None => return Ok(false),
        };

        let entry = self
            .ledger
            .add_hand(situation.pot, action, advice.evs.get(action), realized);
        if self.config.no_color {
            println!(
                "Logged hand {}: {} for {:+.2}, bankroll {:.2}",
                entry.sequence_id, entry.action, entry.realized_result, entry.bankroll_after
            );
        } else {
            println!(
                "{} hand {}: {} for {:+.2}, bankroll {:.2}",
                "Logged".bold().green(),
                entry.sequence_id,
                entry.action.label().bold(),
                entry.realized_result,
                entry.bankroll_after
            );
        }
        Ok(true)
    }

    /// Reads one trimmed, lowercased line; None means the user quit.
    fn prompt(&self, label: &str) -> Result<Option<String>> {
        let mut input = String::new();
        print!("{label}");
        io::stdout().flush()?;
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let trimmed = input.trim().to_lowercase();
        if trimmed == "q" {
            return Ok(None);
        }
        Ok(Some(trimmed))
    }

    fn prompt_amount(&self, name: &str, default: f32) -> Result<Option<f32>> {
        loop {
            let line = match self.prompt(&format!("{name} [{default}]: "))? {
                Some(line) => line,
                None => return Ok(None),
            };
            if line.is_empty() {
                return Ok(Some(default));
            }
            match line.parse::<f32>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => println!("Not a number. Try again."),
            }
        }
    }

    fn print_summary(&self) {
        let ledger = &self.ledger;
        let net = ledger.bankroll() - ledger.starting_bankroll();
        if self.config.no_color {
            println!(
                "Session summary: hands={}, bankroll={:.2}, net={:+.2}",
                ledger.hands_logged(),
                ledger.bankroll(),
                net
            );
        } else {
            println!(
                "{} hands={} bankroll={:.2} net={:+.2}",
                "Session summary".bold().magenta(),
                ledger.hands_logged(),
                ledger.bankroll(),
                net
            );
        }
    }
}

pub fn print_advice(situation: &Situation, advice: &Advice, no_color: bool) {
    let hero: Vec<String> = situation.hero.iter().map(|c| c.to_string()).collect();
    let board = if situation.board.is_empty() {
        "--".to_string()
    } else {
        situation
            .board
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };

    if no_color {
        println!(
            "Hero {} | Board {} | Equity {:.1}% | EV fold {:+.2} call {:+.2} raise {:+.2} | Recommended: {}",
            hero.join(" "),
            board,
            advice.equity * 100.0,
            advice.evs.fold,
            advice.evs.call,
            advice.evs.raise,
            advice.recommended
        );
    } else {
        println!(
            "{} {} {} {} {} {:.1}% {} fold {:+.2} call {:+.2} raise {:+.2} {} {}",
            "Hero".bold().white(),
            hero.join(" ").bold().yellow(),
            "Board".bold().white(),
            board.bold().blue(),
            "Equity".bold().white(),
            advice.equity * 100.0,
            "EV".bold().white(),
            advice.evs.fold,
            advice.evs.call,
            advice.evs.raise,
            "Recommended".bold().yellow(),
            advice.recommended.label().bold().green()
        );
    }
}
