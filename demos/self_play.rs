use nim_search::mcts::MonteCarloTreeSearch;
use nim_search::minimax::Minimax;
use nim_search::random::StandardRandomGenerator;
use nim_search::state::{Player, Position, State};
use nim_search::transition::describe_move;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Random starting piles, as a game setup would generate them
    let mut rng = StandardRandomGenerator;
    let mut state = State::new(Position::random(3, 6, &mut rng), Player::One);

    // Player one searches with MCTS, player two with minimax
    let mut mcts = MonteCarloTreeSearch::builder().with_cycles(2000).build();
    let mut minimax = Minimax::new();

    println!("Start: {}", state.position());
    while !state.is_terminal() {
        let next = match state.player() {
            Player::One => mcts.search(&state),
            Player::Two => minimax.evaluate(&state).best_move().cloned(),
        };
        let Some(next) = next else {
            break;
        };
        if let Some(m) = describe_move(state.position(), next.position()) {
            println!(
                "Player {}: take {} from pile {} -> {}",
                state.player(),
                m.amount,
                m.pile + 1,
                next.position()
            );
        }
        state = next;
    }

    // Whoever is left to move at the empty position did not take the last stick
    println!("Winner: player {}", state.player());
}
