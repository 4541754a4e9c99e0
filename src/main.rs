use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use mahjong_value::tiles::Fon;
use mahjong_value::{evaluate, Game};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Load game from state (.ron file)
    #[arg(long)]
    from_state: PathBuf,

    /// Whose hand to value
    #[arg(long, value_enum, default_value_t = Seat::East)]
    player: Seat,

    /// Print the result as RON
    #[arg(long)]
    ron: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Seat {
    East,
    South,
    West,
    North,
}

impl From<Seat> for Fon {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::East => Fon::Ton,
            Seat::South => Fon::Nan,
            Seat::West => Fon::Shaa,
            Seat::North => Fon::Pee,
        }
    }
}

fn main() {
    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder.target(env_logger::Target::Stderr).init();

    let args = Args::parse();

    let game = match Game::from_ron_file(&args.from_state) {
        Ok(game) => game,
        Err(e) => {
            error!("{}: {}", args.from_state.display(), e);
            std::process::exit(1);
        }
    };
    let wind = Fon::from(args.player);
    info!("Valuing {:?} hand of\n{}", wind, game);

    let result = evaluate(&game, wind);
    if args.ron {
        match ron::ser::to_string_pretty(&result, Default::default()) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                error!("Cannot serialize result: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{}", game.player(wind).te);
    print!("{}", result);
    if result.is_agari() {
        let method = game.agari.method;
        let payment = result.payment(wind == Fon::Ton, method);
        println!("{:?}: {} points", payment, payment.total());
    }
}
