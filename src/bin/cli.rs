use duel_engine::core::analytics::{BattleStats, StatsSnapshot};
use duel_engine::core::battle::{is_battle_over, BattleEngine, BattleOptions};
use duel_engine::core::events::describe;
use duel_engine::core::factory::{build_moveset, normalize_pokemon};
use duel_engine::core::rng::{RandomSource, SeededRandom};
use duel_engine::core::state::{
    create_battle_state, Action, BattleState, Combatant, Outcome, Pokemon, Side, StatKind,
    MAX_MOVES,
};
use duel_engine::data::moves::MoveDatabase;
use duel_engine::data::species::{SpeciesDatabase, SpeciesRecord};
use inquire::list_option::ListOption;
use inquire::validator::Validation;
use inquire::{MultiSelect, Select};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::env;
use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

const DEFAULT_SCOREBOARD: &str = "scoreboard.csv";

#[derive(Debug, Clone)]
struct CliConfig {
    seed: u64,
    scoreboard: PathBuf,
    species_path: Option<PathBuf>,
    moves_path: Option<PathBuf>,
}

impl CliConfig {
    fn from_env() -> Self {
        let seed = env::var("DUEL_SEED")
            .ok()
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!(value = %raw, "DUEL_SEED is not a number, using the clock");
                    None
                }
            })
            .unwrap_or_else(clock_seed);
        Self {
            seed,
            scoreboard: env::var("DUEL_SCOREBOARD")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCOREBOARD)),
            species_path: env::var("DUEL_SPECIES").ok().map(PathBuf::from),
            moves_path: env::var("DUEL_MOVES").ok().map(PathBuf::from),
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// One scoreboard line.
#[derive(Debug, Serialize)]
struct ScoreRow {
    seed: u64,
    player: String,
    opponent: String,
    result: String,
    turns: u32,
    player_damage: u64,
    opponent_damage: u64,
    player_crits: u32,
    opponent_crits: u32,
    duration_ms: Option<u64>,
}

impl ScoreRow {
    fn new(seed: u64, state: &BattleState, snapshot: StatsSnapshot) -> Self {
        let result = match state.outcome {
            Some(Outcome::Winner(Side::Player)) => "win",
            Some(Outcome::Winner(Side::Opponent)) => "loss",
            Some(Outcome::Draw) => "draw",
            None => "abandoned",
        };
        Self {
            seed,
            player: state.combatant(Side::Player).name().to_string(),
            opponent: state.combatant(Side::Opponent).name().to_string(),
            result: result.to_string(),
            turns: snapshot.turns,
            player_damage: snapshot.player_damage,
            opponent_damage: snapshot.opponent_damage,
            player_crits: snapshot.player_crits,
            opponent_crits: snapshot.opponent_crits,
            duration_ms: snapshot.duration_ms,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    info!(seed = config.seed, "starting battle");

    let species_db = match &config.species_path {
        Some(path) => SpeciesDatabase::load_from_path(path)?,
        None => SpeciesDatabase::load_default()?,
    };
    let move_db = match &config.moves_path {
        Some(path) => MoveDatabase::load_from_path(path)?,
        None => MoveDatabase::load_default()?,
    };
    let mut rng = SeededRandom::new(config.seed);

    println!("╔═══════════════════════════════════════╗");
    println!("║           ⚡ DUEL BATTLE CLI ⚡        ║");
    println!("╚═══════════════════════════════════════╝");
    println!();

    let roster = species_db.sorted();
    if roster.len() < 2 {
        return Err("the species catalog needs at least two entries".into());
    }

    let labels: Vec<String> = roster.iter().map(|s| species_label(s)).collect();
    let choice = Select::new("Choose your combatant:", labels.clone())
        .with_page_size(10)
        .prompt()?;
    let player_idx = labels.iter().position(|l| *l == choice).unwrap_or(0);
    let player = equip_player(roster[player_idx], &move_db)?;

    let rivals: Vec<_> = (0..roster.len()).filter(|i| *i != player_idx).collect();
    let pick = rng.range_inclusive(0, rivals.len() as u32 - 1) as usize;
    let opponent = equip_default(roster[rivals[pick]], &move_db)?;

    let mut state = create_battle_state(player, opponent)?;
    let engine = BattleEngine::new(BattleOptions::default());
    let names = [
        state.combatant(Side::Player).name().to_string(),
        state.combatant(Side::Opponent).name().to_string(),
    ];
    let started = Instant::now();

    println!();
    println!("════════════════════════════════════════");
    println!("   {} vs {}", names[0], names[1]);
    println!("════════════════════════════════════════");
    println!();

    while !is_battle_over(&state) {
        print_battle_status(&state);

        let player_action = prompt_action(state.combatant(Side::Player))?;
        let opponent_action = random_action(state.combatant(Side::Opponent), &mut rng);
        if player_action == Action::Pass && opponent_action == Action::Pass {
            println!("Neither side has a move left to use.");
            break;
        }

        let result = engine.resolve_turn(&state, player_action, opponent_action, &mut rng)?;
        println!();
        for event in &result.events {
            println!("  📝 {}", describe(event, [&names[0], &names[1]]));
        }
        println!();
        state = result.state;
    }

    println!("════════════════════════════════════════");
    match state.outcome {
        Some(Outcome::Winner(Side::Player)) => println!("      🎉 You won! 🎉"),
        Some(Outcome::Winner(Side::Opponent)) => println!("      💔 You lost..."),
        Some(Outcome::Draw) => println!("      🤝 Both sides fainted. It's a draw."),
        None => println!("      The battle was abandoned."),
    }
    println!("════════════════════════════════════════");

    let stats = BattleStats::from_events(
        state
            .history
            .iter()
            .flat_map(|h| h.turns.iter())
            .flat_map(|t| t.events.iter()),
    )
    .with_duration(started.elapsed());
    let snapshot = stats.snapshot();
    println!(
        "Turns: {} | damage dealt {} / {} | crits {} / {}",
        snapshot.turns,
        snapshot.player_damage,
        snapshot.opponent_damage,
        snapshot.player_crits,
        snapshot.opponent_crits
    );

    let row = ScoreRow::new(config.seed, &state, snapshot);
    if let Err(e) = append_score(&config.scoreboard, &row) {
        warn!(error = %e, path = %config.scoreboard.display(), "could not write scoreboard");
    }
    Ok(())
}

fn species_label(species: &SpeciesRecord) -> String {
    let types: Vec<&str> = species.types.iter().map(|t| t.kind.name.as_str()).collect();
    let total: u32 = species.stats.iter().map(|s| s.base_stat).sum();
    format!("#{:03} {} [{}] (base total {})", species.id, species.name, types.join("/"), total)
}

fn known_learnable<'a>(species: &'a SpeciesRecord, move_db: &MoveDatabase) -> Vec<&'a str> {
    species
        .moves
        .iter()
        .map(|m| m.entry.name.as_str())
        .filter(|name| move_db.get(name).is_some())
        .collect()
}

fn equip_default(species: &SpeciesRecord, move_db: &MoveDatabase) -> Result<Pokemon, Box<dyn Error>> {
    let moves: Vec<&str> = known_learnable(species, move_db).into_iter().take(MAX_MOVES).collect();
    let pokemon = normalize_pokemon(species, None)?;
    Ok(build_moveset(pokemon, &moves, move_db)?)
}

fn equip_player(species: &SpeciesRecord, move_db: &MoveDatabase) -> Result<Pokemon, Box<dyn Error>> {
    let learnable = known_learnable(species, move_db);
    if learnable.len() <= MAX_MOVES {
        return equip_default(species, move_db);
    }

    let options: Vec<String> = learnable
        .iter()
        .filter_map(|name| move_db.get(name))
        .map(|m| {
            let power = m.power.map_or_else(|| "-".to_string(), |p| p.to_string());
            format!("{} [{}] {} power:{}", m.name, m.element.name, m.damage_class.name, power)
        })
        .collect();
    let validator = |s: &[ListOption<&String>]| {
        if s.is_empty() || s.len() > MAX_MOVES {
            Ok(Validation::Invalid(
                format!("Pick between 1 and {} moves", MAX_MOVES).into(),
            ))
        } else {
            Ok(Validation::Valid)
        }
    };
    let selected = MultiSelect::new(
        &format!("Choose moves for {} (space to toggle, enter to confirm):", species.name),
        options.clone(),
    )
    .with_page_size(10)
    .with_validator(validator)
    .prompt()?;

    let moves: Vec<&str> = selected
        .iter()
        .filter_map(|choice| options.iter().position(|opt| opt == choice))
        .map(|pos| learnable[pos])
        .collect();
    let pokemon = normalize_pokemon(species, None)?;
    Ok(build_moveset(pokemon, &moves, move_db)?)
}

fn prompt_action(combatant: &Combatant) -> Result<Action, Box<dyn Error>> {
    let usable: Vec<_> = combatant.usable_moves().collect();
    if usable.is_empty() {
        println!("{} has no PP left and can only wait.", combatant.name());
        return Ok(Action::Pass);
    }
    let options: Vec<String> = usable
        .iter()
        .map(|m| {
            let slot = combatant.move_slot(m.id).unwrap_or(0);
            let pp = match combatant.pp.get(slot).copied().flatten() {
                Some(left) => format!("{}/{}", left, m.pp.unwrap_or(left)),
                None => "∞".to_string(),
            };
            let power = m.power.map_or_else(|| "-".to_string(), |p| p.to_string());
            format!("{} [{}] power:{} pp:{}", m.name, m.element, power, pp)
        })
        .collect();
    let choice = Select::new("What will you do?", options.clone()).prompt()?;
    let pos = options.iter().position(|o| *o == choice).unwrap_or(0);
    Ok(Action::use_move(usable[pos].id))
}

fn random_action(combatant: &Combatant, rng: &mut dyn RandomSource) -> Action {
    let usable: Vec<_> = combatant.usable_moves().collect();
    if usable.is_empty() {
        return Action::Pass;
    }
    let pick = rng.range_inclusive(0, usable.len() as u32 - 1) as usize;
    Action::use_move(usable[pick].id)
}

fn print_battle_status(state: &BattleState) {
    println!("─────────────────────────────────────────");
    println!("  Turn {}", state.turn + 1);
    println!("─────────────────────────────────────────");
    for (label, side) in [("Foe", Side::Opponent), ("You", Side::Player)] {
        let c = state.combatant(side);
        let types: Vec<String> = c.pokemon.types.iter().map(|t| t.to_string()).collect();
        println!(
            "  [{}] {} ({}) {}",
            label,
            c.name(),
            types.join("/"),
            hp_bar_string(c.hp, c.max_hp())
        );
        if let Some(status) = c.status {
            println!("        status: {}", status.kind());
        }
        print_stage_changes(c);
    }
    println!();
}

fn hp_bar_string(hp: u32, max_hp: u32) -> String {
    let max_hp = max_hp.max(1);
    let percentage = hp * 100 / max_hp;
    let bars = ((hp * 10 / max_hp) as usize).min(10);
    let filled = "█".repeat(bars);
    let empty = "░".repeat(10 - bars);
    format!("[{}{}] {}/{} ({}%)", filled, empty, hp, max_hp, percentage)
}

fn print_stage_changes(c: &Combatant) {
    let changes: Vec<String> = [
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpecialAttack,
        StatKind::SpecialDefense,
        StatKind::Speed,
        StatKind::Accuracy,
    ]
    .into_iter()
    .filter(|stat| c.stages.get(*stat) != 0)
    .map(|stat| format!("{} {:+}", stat.label(), c.stages.get(stat)))
    .collect();
    if !changes.is_empty() {
        println!("        stages: {}", changes.join(", "));
    }
}

fn append_score(path: &Path, row: &ScoreRow) -> Result<(), Box<dyn Error>> {
    let exists = path.exists() && path.metadata().map(|m| m.len() > 0).unwrap_or(false);
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(!exists)
        .from_writer(file);
    writer.serialize(row)?;
    writer.flush()?;
    Ok(())
}
