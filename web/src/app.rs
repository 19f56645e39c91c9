use gloo::timers::callback::{Interval, Timeout};
use yew::prelude::*;

use crate::storage::LocalScoreStorage;
use crate::utils::js_random_seed;
use memorito_core as game;
use memorito_core::{
    format_time, CardId, DeckGenerator, Difficulty, FlipOutcome, RandomDeckGenerator, ScoreBoard,
    UnflipToken, MISMATCH_DELAY_MS,
};

/// How long the win overlay stays on screen.
const CELEBRATION_MS: u32 = 3000;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CardClicked(CardId),
    Unflip(UnflipToken),
    UpdateTime,
    NewGame,
    SetDifficulty(Difficulty),
    EndCelebration,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    card: game::Card,
    #[prop_or_default]
    disabled: bool,
    callback: Callback<CardId>,
}

#[function_component(CardCell)]
fn card_cell(props: &CardProps) -> Html {
    let CardProps {
        card,
        disabled,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        card.is_face_up().then_some("flipped"),
        card.is_matched.then_some("matched"),
        (disabled || !card.is_selectable()).then_some("disabled"),
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", card.id);
        callback.emit(card.id);
    });

    html! {
        <td {class} {onclick}>
            { if card.is_face_up() { card.symbol } else { "" } }
        </td>
    }
}

fn deal(difficulty: Difficulty) -> game::Game {
    let deck = RandomDeckGenerator::new(js_random_seed())
        .generate(difficulty)
        .expect("symbol catalog covers every supported difficulty");
    game::Game::new(deck)
}

pub(crate) struct GameView {
    difficulty: Difficulty,
    game: game::Game,
    scores: ScoreBoard<LocalScoreStorage>,
    prev_time: u32,
    celebrating: bool,
    _timer_interval: Interval,
    unflip_timeout: Option<Timeout>,
    celebration_timeout: Option<Timeout>,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    /// Replace the running game with a fresh deck. Dropping the pending
    /// timeouts cancels them; the engine's token guard covers any that
    /// already fired.
    fn reset(&mut self) {
        self.unflip_timeout = None;
        self.celebration_timeout = None;
        self.celebrating = false;
        self.prev_time = 0;
        self.game = deal(self.difficulty);
    }

    fn handle_card_click(&mut self, ctx: &Context<Self>, card_id: CardId) -> bool {
        let outcome = self.game.select_card(card_id);
        match outcome {
            FlipOutcome::Mismatch(token) => {
                let link = ctx.link().clone();
                self.unflip_timeout = Some(Timeout::new(MISMATCH_DELAY_MS, move || {
                    link.send_message(Msg::Unflip(token))
                }));
            }
            FlipOutcome::Won => {
                let moves = self.game.moves();
                let time = self.game.final_time_secs().unwrap_or(0);
                log::debug!("game won: {} moves in {}s", moves, time);
                self.scores.save_score(self.difficulty, moves, time);
                self.celebrating = true;
                let link = ctx.link().clone();
                self.celebration_timeout = Some(Timeout::new(CELEBRATION_MS, move || {
                    link.send_message(Msg::EndCelebration)
                }));
            }
            _ => {}
        }
        outcome.has_update()
    }

    fn best_score_line(&self) -> String {
        match self.scores.best_score(self.difficulty) {
            Some(best) => format!("Best: {} moves · {}", best.moves, format_time(best.time)),
            None => "Best: —".to_string(),
        }
    }

    fn game_state_class(&self) -> Classes {
        use game::GameState::*;
        classes!(match self.game.cur_state() {
            NotStarted => "not-started",
            InProgress => "in-progress",
            Won => "won",
        })
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let difficulty = Difficulty::default();
        Self {
            difficulty,
            game: deal(difficulty),
            scores: ScoreBoard::new(LocalScoreStorage),
            prev_time: 0,
            celebrating: false,
            _timer_interval: GameView::create_timer(ctx),
            unflip_timeout: None,
            celebration_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CardClicked(card_id) => self.handle_card_click(ctx, card_id),
            Unflip(token) => {
                self.unflip_timeout = None;
                self.game.resolve_unflip(token).has_update()
            }
            UpdateTime => {
                let time = self.game.elapsed_secs();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            NewGame => {
                self.reset();
                true
            }
            SetDifficulty(difficulty) => {
                if self.difficulty != difficulty {
                    self.difficulty = difficulty;
                    self.reset();
                    true
                } else {
                    false
                }
            }
            EndCelebration => {
                self.celebration_timeout = None;
                std::mem::take(&mut self.celebrating)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let config = self.difficulty.config();
        let locked = self.game.is_locked_out() || self.game.is_won();
        let cb_card = ctx.link().callback(CardClicked);
        let cb_new_game = ctx.link().callback(|_| NewGame);

        html! {
            <div class="memorito">
                <header>
                    <h1>{"Memory Master"}</h1>
                    <nav class="difficulties">
                        {
                            for Difficulty::ALL.iter().map(|&difficulty| {
                                let class = classes!((difficulty == self.difficulty).then_some("selected"));
                                let onclick = ctx.link().callback(move |_| SetDifficulty(difficulty));
                                html! {
                                    <button {class} {onclick}>{difficulty.config().name}</button>
                                }
                            })
                        }
                    </nav>
                </header>
                <nav class="stats">
                    <aside>{format!("Moves: {}", self.game.moves())}</aside>
                    <aside>{format!("Matches: {}/{}", self.game.matches(), self.game.total_pairs())}</aside>
                    <aside>{format!("Time: {}", format_time(self.game.elapsed_secs()))}</aside>
                    <aside>{self.best_score_line()}</aside>
                    <span>
                        <button class={self.game_state_class()} onclick={cb_new_game}>{"New Game"}</button>
                    </span>
                </nav>
                <table>
                    {
                        for (0..config.rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..config.cols).map(|col| {
                                        let card_id = row * config.cols + col;
                                        let card = self.game.card_at(card_id)
                                            .unwrap_or_else(|| game::Card::face_down(card_id, ""));
                                        html! {
                                            <CardCell {card} disabled={locked} callback={cb_card.clone()}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                if self.celebrating {
                    <div class="celebration">
                        <h2>{"Congratulations!"}</h2>
                        <p>{format!("You won in {} moves!", self.game.moves())}</p>
                    </div>
                }
            </div>
        }
    }
}
