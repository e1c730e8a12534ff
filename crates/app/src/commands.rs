use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use quest_core::badges::newly_earned;
use quest_core::model::{Badge, CourseId, Role};
use serde::Serialize;
use services::{
    Clock, CourseListing, Credentials, GameListing, HelperChat, ProgressStore, QuizService,
    QuizStep, SessionManager, Timings, course_listing, game_listing,
};
use tracing::debug;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

fn prompt(line: &str) -> Result<Option<String>> {
    print!("{line}");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn parse_option(input: &str) -> Option<usize> {
    let upper = input.to_ascii_uppercase();
    if let Some(i) = OPTION_LABELS.iter().position(|c| upper == c.to_string()) {
        return Some(i);
    }
    input.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}

pub async fn quiz(
    timings: Timings,
    course_id: CourseId,
    email: &str,
    role: Option<Role>,
    age: Option<u8>,
) -> Result<()> {
    let clock = Clock::system();
    let mut sessions = SessionManager::mock(clock);
    let mut credentials = Credentials::new(email, "");
    if let Some(role) = role {
        credentials = credentials.with_role(role);
    }
    if let Some(age) = age {
        credentials = credentials.with_child_age(age);
    }
    sessions.login(&credentials).context("sign-in failed")?;
    let identity = sessions.identity().cloned();

    let quiz = QuizService::new(clock).with_timings(timings);
    let view = sessions.active()?.child_view();
    let mut attempt = quiz.start_quiz(course_id.clone(), identity.as_ref(), view);
    println!(
        "{} quiz ({} questions). Type q to quit.",
        course_id.display_name(),
        attempt.questions().len()
    );

    let progress = sessions.active_mut()?.progress_mut();
    let before = progress.list_badges().to_vec();

    while let Some(question) = attempt.current_question().cloned() {
        let number = attempt.progress().question_number;
        println!("\nQuestion {number}: {}", question.prompt());
        for (label, option) in OPTION_LABELS.iter().zip(question.options()) {
            println!("  {label}) {option}");
        }

        let Some(input) = prompt("> ")? else {
            attempt.abandon();
            break;
        };
        if input.eq_ignore_ascii_case("q") {
            attempt.abandon();
            break;
        }
        let Some(chosen) = parse_option(&input) else {
            println!("Pick A, B, C or D.");
            continue;
        };
        let index = attempt.current_index();
        let feedback = match quiz.answer(&mut attempt, index, chosen) {
            Ok(feedback) => feedback,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if feedback.correct {
            println!("Correct! 🎉");
        } else {
            let right = question.correct_index();
            println!(
                "Not quite. The answer was {}) {}",
                OPTION_LABELS[right],
                question.options()[right]
            );
        }

        let step = quiz.advance_after_feedback(&mut attempt, progress).await?;
        if let Some(QuizStep::Finished(result)) = step {
            let verdict = if result.passed() {
                "Passed! 🌟"
            } else {
                "Keep practicing! 💪"
            };
            println!(
                "\nScore: {:.0}% ({}/{}). {verdict}",
                result.score(),
                attempt.correct_count(),
                attempt.questions().len()
            );
        }
    }

    if attempt.is_abandoned() {
        println!("Quiz abandoned. Nothing was recorded.");
    }
    report_badges(&before, progress.list_badges());
    print_overview(progress);

    sessions.logout();
    Ok(())
}

fn report_badges(before: &[Badge], after: &[Badge]) {
    for id in newly_earned(before, after) {
        if let Some(badge) = after.iter().find(|b| b.id() == id) {
            println!("New badge: {} {}", badge.icon(), badge.title());
        }
    }
}

fn print_overview(progress: &ProgressStore) {
    let overview = progress.overview();
    debug!(?overview, "session overview");
    println!(
        "Attempts: {}  Passed: {}  Average: {:.0}%  Badges: {}/{}",
        overview.total_attempts,
        overview.passed_attempts,
        overview.average_score,
        overview.earned_badges,
        overview.total_badges
    );
}

#[derive(Serialize)]
struct Catalog {
    courses: Vec<CourseListing>,
    games: Vec<GameListing>,
}

pub fn catalog(json: bool) -> Result<()> {
    let progress = ProgressStore::new(Clock::system());
    let catalog = Catalog {
        courses: course_listing(),
        games: game_listing(&progress),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let lock = |locked: bool| if locked { "🔒" } else { "  " };
    println!("Courses");
    for listing in &catalog.courses {
        println!(
            "  {} {:<16} {}",
            lock(listing.locked),
            listing.course.id(),
            listing.course.title()
        );
    }
    println!("Games");
    for listing in &catalog.games {
        println!(
            "  {} {:<16} {} (pass {})",
            lock(listing.locked),
            listing.game.id(),
            listing.game.title(),
            listing.game.required_course().display_name()
        );
    }
    Ok(())
}

pub async fn helper(timings: Timings) -> Result<()> {
    let mut sessions = SessionManager::mock(Clock::system());
    sessions.login(&Credentials::new("learner@kidquest.local", ""))?;
    let mut chat = HelperChat::new(timings.helper_reply, sessions.active()?.child_view());
    chat.open();
    let mut rng = rand::rng();
    for message in chat.messages() {
        println!("🤖 {}", message.text);
    }

    while let Some(input) = prompt("you> ")? {
        if input.eq_ignore_ascii_case("bye") {
            break;
        }
        let Some(reply) = chat.send(&input, &mut rng) else {
            continue;
        };
        reply.elapsed().await;
        if !chat.deliver(reply) {
            bail!("helper reply arrived after the chat closed");
        }
        if let Some(last) = chat.messages().last() {
            println!("🤖 {}", last.text);
        }
    }

    chat.close();
    sessions.logout();
    Ok(())
}
