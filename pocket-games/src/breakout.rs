use std::thread;
use std::time::Duration;

use pocket_core::event::InputEvent;
use pocket_core::game::{Game, GameExit};
use pocket_core::input::InputSource;
use pocket_core::screen::{RowStyle, Screen};

use crate::intro::{self, IntroOutcome};

pub const FIELD_WIDTH: usize = 28;
pub const FIELD_HEIGHT: usize = 14;

/// Bricks are two cells wide and fill the rows just under the title.
const BRICK_ROWS: usize = 4;
const BRICK_COLS: usize = FIELD_WIDTH / 2;
const PADDLE_WIDTH: i32 = 5;
const PADDLE_STEP: i32 = 2;
const POINTS_PER_BRICK: u32 = 10;
const START_LIVES: u32 = 3;

const TICK: Duration = Duration::from_millis(70);
const INTRO_DEADLINE: Duration = Duration::from_secs(5);
const GAME_OVER_HOLD: Duration = Duration::from_secs(3);

/// Paddle, ball and a wall of bricks.
pub struct Breakout {
    bricks: [[bool; BRICK_COLS]; BRICK_ROWS],
    paddle_x: i32,
    ball_x: i32,
    ball_y: i32,
    vel_x: i32,
    vel_y: i32,
    score: u32,
    lives: u32,
    over: bool,
    won: bool,
}

impl Default for Breakout {
    fn default() -> Self {
        Self::new()
    }
}

impl Breakout {
    pub fn new() -> Self {
        let mut game = Self {
            bricks: [[true; BRICK_COLS]; BRICK_ROWS],
            paddle_x: 0,
            ball_x: 0,
            ball_y: 0,
            vel_x: 1,
            vel_y: -1,
            score: 0,
            lives: START_LIVES,
            over: false,
            won: false,
        };
        game.reset_ball();
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn paddle_row() -> i32 {
        (FIELD_HEIGHT - 1) as i32
    }

    fn reset_ball(&mut self) {
        self.paddle_x = (FIELD_WIDTH as i32 - PADDLE_WIDTH) / 2;
        self.ball_x = FIELD_WIDTH as i32 / 2;
        self.ball_y = Self::paddle_row() - 1;
        self.vel_x = 1;
        self.vel_y = -1;
    }

    fn bricks_left(&self) -> usize {
        self.bricks
            .iter()
            .map(|row| row.iter().filter(|b| **b).count())
            .sum()
    }

    /// Returns false when the player backs out of the session.
    fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Back | InputEvent::Quit => return false,
            _ if self.over => {}
            InputEvent::Left => {
                self.paddle_x = (self.paddle_x - PADDLE_STEP).max(0);
            }
            InputEvent::Right => {
                self.paddle_x =
                    (self.paddle_x + PADDLE_STEP).min(FIELD_WIDTH as i32 - PADDLE_WIDTH);
            }
            InputEvent::Up | InputEvent::Down | InputEvent::Select => {}
        }
        true
    }

    /// One simulation step: move the ball one cell and resolve collisions in
    /// the order wall, bricks, paddle, floor.
    fn tick(&mut self) {
        if self.over {
            return;
        }

        let mut next_x = self.ball_x + self.vel_x;
        let mut next_y = self.ball_y + self.vel_y;

        if next_x < 0 || next_x >= FIELD_WIDTH as i32 {
            self.vel_x = -self.vel_x;
            next_x = self.ball_x + self.vel_x;
        }
        if next_y < 0 {
            self.vel_y = -self.vel_y;
            next_y = self.ball_y + self.vel_y;
        }

        // Brick band sits on rows 1..=BRICK_ROWS.
        if (1..=BRICK_ROWS as i32).contains(&next_y) {
            let row = (next_y - 1) as usize;
            let col = (next_x / 2) as usize;
            if self.bricks[row][col] {
                self.bricks[row][col] = false;
                self.score += POINTS_PER_BRICK;
                self.vel_y = -self.vel_y;
                next_y = self.ball_y + self.vel_y;
                if self.bricks_left() == 0 {
                    self.won = true;
                    self.over = true;
                    return;
                }
            }
        }

        if next_y == Self::paddle_row()
            && next_x >= self.paddle_x
            && next_x < self.paddle_x + PADDLE_WIDTH
        {
            self.vel_y = -1;
            // Outer thirds of the paddle steer the ball.
            let hit = next_x - self.paddle_x;
            if hit < PADDLE_WIDTH / 3 {
                self.vel_x = -1;
            } else if hit >= PADDLE_WIDTH - PADDLE_WIDTH / 3 {
                self.vel_x = 1;
            }
            next_y = self.ball_y + self.vel_y;
        }

        if next_y > Self::paddle_row() {
            self.lives -= 1;
            if self.lives == 0 {
                self.over = true;
            } else {
                self.reset_ball();
            }
            return;
        }

        self.ball_x = next_x;
        self.ball_y = next_y;
    }

    fn render(&self, screen: &mut dyn Screen) {
        screen.draw_row(
            0,
            &format!(
                "BREAKOUT   score {:>5}   lives {}",
                self.score, self.lives
            ),
            RowStyle::Title,
        );
        for y in 0..FIELD_HEIGHT {
            let mut line = String::with_capacity(FIELD_WIDTH);
            if (1..=BRICK_ROWS).contains(&y) {
                for col in 0..BRICK_COLS {
                    line.push_str(if self.bricks[y - 1][col] { "==" } else { "  " });
                }
            } else {
                line.push_str(&" ".repeat(FIELD_WIDTH));
            }
            let mut row: Vec<char> = line.chars().collect();
            if y as i32 == Self::paddle_row() {
                for x in self.paddle_x..self.paddle_x + PADDLE_WIDTH {
                    row[x as usize] = '=';
                }
            }
            if !self.over && y as i32 == self.ball_y {
                row[self.ball_x as usize] = 'o';
            }
            let text: String = row.into_iter().collect();
            screen.draw_row(y + 1, &text, RowStyle::Normal);
        }
    }
}

impl Game for Breakout {
    fn title(&self) -> &str {
        "BREAKOUT"
    }

    fn run(&mut self, input: &mut dyn InputSource, screen: &mut dyn Screen) -> GameExit {
        let outcome = intro::wait_for_start(
            "BREAKOUT",
            "stick left/right to move the paddle",
            input,
            screen,
            INTRO_DEADLINE,
        );
        if outcome == IntroOutcome::Abort {
            return GameExit::Quit;
        }

        screen.clear();
        loop {
            while let Some(event) = input.poll_event() {
                if !self.handle_event(event) {
                    log::info!("breakout quit, score {}", self.score);
                    return GameExit::Quit;
                }
            }
            self.tick();
            self.render(screen);
            if self.over {
                let banner = if self.won { "  YOU WIN  " } else { " GAME OVER " };
                screen.draw_row(FIELD_HEIGHT / 2, banner, RowStyle::Highlighted);
                intro::wait_for_start("BREAKOUT", banner, input, screen, GAME_OVER_HOLD);
                log::info!("breakout over, score {}", self.score);
                return GameExit::GameOver { score: self.score };
            }
            thread::sleep(TICK);
        }
    }
}
