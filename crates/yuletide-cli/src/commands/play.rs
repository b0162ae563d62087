//! Headless game driver.
//!
//! A script is a comma- or whitespace-separated list of steps. `wait:<ms>`
//! advances the game clock; every other step is game input:
//!
//! | game       | steps                                               |
//! |------------|-----------------------------------------------------|
//! | memory     | `flip:<index>`                                      |
//! | snowflakes | `catch` (oldest flake), `catch:<id>`                |
//! | decorate   | `select:<ornament>`, `place:<x>:<y>`, `remove:<id>`, `save` |
//! | snowman    | `add:<part>`                                        |
//! | sleigh     | `up`, `down`                                        |
//! | stack      | `drop`                                              |

use clap::Args;
use serde_json::json;
use yuletide_core::games::{
    ArcadeLoop, ArcadePolicy, CandyCaneInput, CandyCaneStack, CatchSnowflakes, DecorateInput,
    DecorateTree, EntityId, MemoryInput, MemoryMatch, SleighInput, SleighRide, SnowflakeInput,
    SnowmanBuilder, SnowmanInput,
};
use yuletide_core::games::ensure_playable;
use yuletide_core::{AppConfig, Clock, GameKind, GamePhase, KeyValueStore, PreferenceStore, SystemClock};

use super::{open_preferences, print_json, CliResult};

#[derive(Args)]
pub struct PlayArgs {
    /// Game id (memory, snowflakes, decorate, snowman, sleigh, stack)
    pub game: GameKind,
    /// RNG seed for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,
    /// Steps to play, e.g. "flip:0,flip:1,wait:1000"
    #[arg(long, default_value = "")]
    pub script: String,
    /// Days remaining to check the unlock against (defaults to the live countdown)
    #[arg(long, allow_negative_numbers = true)]
    pub days: Option<i64>,
}

enum Step<P: ArcadePolicy> {
    Wait(u64),
    Input(P::Input),
    /// Input that depends on the current game state.
    Pick(fn(&P) -> Option<P::Input>),
}

type ParseStep<P> = fn(&str) -> Result<Step<P>, String>;

pub fn run(args: PlayArgs) -> CliResult {
    let config = AppConfig::load_or_default();
    let prefs = open_preferences(&config)?;
    match args.days {
        Some(days) => args.game.ensure_unlocked(days)?,
        None => {
            ensure_playable(args.game, &prefs, SystemClock.now())?;
        }
    }
    let script = &args.script;
    let seed = args.seed;

    match args.game {
        GameKind::MemoryMatch => play(MemoryMatch::new(), seed, script, memory_step, &prefs),
        GameKind::CatchSnowflakes => {
            let games = &config.games;
            let field = CatchSnowflakes::new(games.playfield_width, games.playfield_height);
            play(field, seed, script, snowflake_step, &prefs)
        }
        GameKind::DecorateTree => play(DecorateTree::new(), seed, script, decorate_step, &prefs),
        GameKind::SnowmanBuilder => play(SnowmanBuilder::new(), seed, script, snowman_step, &prefs),
        GameKind::SleighRide => play(SleighRide::new(), seed, script, sleigh_step, &prefs),
        GameKind::CandyCaneStack => play(CandyCaneStack::new(), seed, script, stack_step, &prefs),
    }
}

fn play<P: ArcadePolicy, S: KeyValueStore>(
    policy: P,
    seed: Option<u64>,
    script: &str,
    parse: ParseStep<P>,
    prefs: &PreferenceStore<S>,
) -> CliResult {
    let steps = script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            if let Some(ms) = t.strip_prefix("wait:") {
                return ms
                    .parse()
                    .map(Step::Wait)
                    .map_err(|_| format!("bad wait step '{t}'"));
            }
            parse(t)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut game = match seed {
        Some(seed) => ArcadeLoop::with_seed(policy, seed),
        None => ArcadeLoop::new(policy),
    };

    let mut events = Vec::new();
    events.extend(game.start());
    for step in steps {
        let event = match step {
            Step::Wait(ms) => game.advance(ms),
            Step::Input(input) => game.try_send(input)?,
            Step::Pick(pick) => match pick(game.policy()) {
                Some(input) => game.try_send(input)?,
                None => None,
            },
        };
        events.extend(event);
        if !game.is_playing() {
            break;
        }
    }
    events.extend(game.submit_best(prefs));

    for event in &events {
        print_json(event)?;
    }
    print_json(&json!({
        "game": game.kind().as_str(),
        "phase": game.phase(),
        "score": game.score(),
        "finished": matches!(game.phase(), GamePhase::Finished(_)),
    }))
}

fn arg<'a>(token: &'a str, name: &str) -> Result<&'a str, String> {
    token
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or_else(|| format!("expected '{name}:<value>', got '{token}'"))
}

fn number<T: std::str::FromStr>(token: &str, raw: &str) -> Result<T, String> {
    raw.parse().map_err(|_| format!("bad number in step '{token}'"))
}

fn unknown<P: ArcadePolicy>(token: &str) -> Result<Step<P>, String> {
    Err(format!("unknown step '{token}' for {}", P::KIND))
}

fn memory_step(token: &str) -> Result<Step<MemoryMatch>, String> {
    let index = number(token, arg(token, "flip")?)?;
    Ok(Step::Input(MemoryInput::Flip(index)))
}

fn snowflake_step(token: &str) -> Result<Step<CatchSnowflakes>, String> {
    if token == "catch" {
        return Ok(Step::Pick(|game: &CatchSnowflakes| {
            game.flakes()
                .iter()
                .next()
                .map(|(id, _)| SnowflakeInput::Catch(id))
        }));
    }
    let id = number(token, arg(token, "catch")?)?;
    Ok(Step::Input(SnowflakeInput::Catch(EntityId(id))))
}

fn decorate_step(token: &str) -> Result<Step<DecorateTree>, String> {
    if token == "save" {
        return Ok(Step::Input(DecorateInput::Save));
    }
    if let Ok(kind) = arg(token, "select") {
        let kind = kind.parse().map_err(|e| format!("{e}"))?;
        return Ok(Step::Input(DecorateInput::Select(kind)));
    }
    if let Ok(id) = arg(token, "remove") {
        return Ok(Step::Input(DecorateInput::Remove(EntityId(number(token, id)?))));
    }
    if let Ok(point) = arg(token, "place") {
        let (x, y) = point
            .split_once(':')
            .ok_or_else(|| format!("expected 'place:<x>:<y>', got '{token}'"))?;
        return Ok(Step::Input(DecorateInput::Place {
            x: number(token, x)?,
            y: number(token, y)?,
        }));
    }
    unknown(token)
}

fn snowman_step(token: &str) -> Result<Step<SnowmanBuilder>, String> {
    let part = arg(token, "add")?.parse().map_err(|e| format!("{e}"))?;
    Ok(Step::Input(SnowmanInput::Add(part)))
}

fn sleigh_step(token: &str) -> Result<Step<SleighRide>, String> {
    match token {
        "up" => Ok(Step::Input(SleighInput::Up)),
        "down" => Ok(Step::Input(SleighInput::Down)),
        _ => unknown(token),
    }
}

fn stack_step(token: &str) -> Result<Step<CandyCaneStack>, String> {
    match token {
        "drop" => Ok(Step::Input(CandyCaneInput::Drop)),
        _ => unknown(token),
    }
}
