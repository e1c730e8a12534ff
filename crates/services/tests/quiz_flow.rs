use std::time::Duration;

use quest_core::model::{BadgeId, CourseId, GameId, QuizResult, Role};
use quest_core::time::{fixed_clock, fixed_now};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    Credentials, HelperChat, QuizError, QuizService, QuizSession, QuizStep, SessionManager,
    Timings, ViewGeneration, game_listing,
};

fn child(age: u8) -> Credentials {
    Credentials::new("kid@example.com", "secret")
        .with_role(Role::Child)
        .with_child_age(age)
}

fn answer_all(
    quiz: &QuizService,
    session: &mut QuizSession,
    progress: &mut services::ProgressStore,
    mut pick: impl FnMut(usize, usize) -> usize,
) -> QuizResult {
    loop {
        let index = session.current_index();
        let correct = session.current_question().unwrap().correct_index();
        let step = quiz
            .submit_answer(session, progress, index, pick(index, correct))
            .unwrap()
            .step;
        if let QuizStep::Finished(result) = step {
            return result;
        }
    }
}

#[test]
fn beginner_math_answer_key_scores_full_marks() {
    let quiz = QuizService::new(fixed_clock());
    let mut sessions = SessionManager::mock(fixed_clock());
    sessions.login(&child(8)).unwrap();
    let identity = sessions.identity().cloned();
    let view = sessions.active().unwrap().child_view();
    let progress = sessions.active_mut().unwrap().progress_mut();

    let mut session = quiz.start_quiz(
        CourseId::new(CourseId::MATH_ADVENTURE),
        identity.as_ref(),
        view,
    );
    let key = [2, 1, 2, 2, 2];
    let result = answer_all(&quiz, &mut session, progress, |i, _| key[i]);

    assert_eq!(result.score(), 100.0);
    assert!(result.passed());
    assert_eq!(result.timestamp(), fixed_now());
    assert!(progress.has_passed(&CourseId::new(CourseId::MATH_ADVENTURE)));
    assert!(
        progress
            .list_badges()
            .iter()
            .any(|b| b.id() == BadgeId::QuizMaster && b.earned())
    );
}

#[test]
fn all_wrong_fails_and_awards_nothing() {
    let quiz = QuizService::new(fixed_clock());
    let mut sessions = SessionManager::mock(fixed_clock());
    sessions.login(&child(12)).unwrap();
    let identity = sessions.identity().cloned();
    let view = sessions.active().unwrap().child_view();
    let progress = sessions.active_mut().unwrap().progress_mut();

    let mut session = quiz.start_quiz(
        CourseId::new(CourseId::SCIENCE_QUEST),
        identity.as_ref(),
        view,
    );
    let result = answer_all(&quiz, &mut session, progress, |_, correct| (correct + 1) % 4);

    assert_eq!(result.score(), 0.0);
    assert!(!result.passed());
    assert_eq!(progress.results().len(), 1);
    assert!(progress.list_badges().iter().all(|b| !b.earned()));
}

#[test]
fn passing_unlocks_the_course_game_for_good() {
    let quiz = QuizService::new(fixed_clock());
    let mut sessions = SessionManager::mock(fixed_clock());
    sessions.login(&child(9)).unwrap();
    let identity = sessions.identity().cloned();
    let pass_view = sessions.active().unwrap().child_view();
    let fail_view = sessions.active().unwrap().child_view();
    let progress = sessions.active_mut().unwrap().progress_mut();

    let locked = |progress: &services::ProgressStore| {
        game_listing(progress)
            .into_iter()
            .find(|l| l.game.id() == GameId::WordPuzzle)
            .unwrap()
            .locked
    };
    assert!(locked(progress));

    let english = CourseId::new(CourseId::ENGLISH_FUN);
    let mut pass = quiz.start_quiz(english.clone(), identity.as_ref(), pass_view);
    answer_all(&quiz, &mut pass, progress, |_, correct| correct);
    assert!(!locked(progress));

    let mut fail = quiz.start_quiz(english, identity.as_ref(), fail_view);
    answer_all(&quiz, &mut fail, progress, |_, correct| (correct + 1) % 4);
    assert!(!locked(progress));
    assert_eq!(progress.results().len(), 2);
}

#[test]
fn abandoned_attempt_is_not_recorded() {
    let quiz = QuizService::new(fixed_clock());
    let mut sessions = SessionManager::mock(fixed_clock());
    sessions.login(&child(8)).unwrap();
    let progress = sessions.active_mut().unwrap().progress_mut();

    let mut session = quiz.start_quiz(
        CourseId::new(CourseId::MATH_ADVENTURE),
        None,
        ViewGeneration::new(),
    );
    quiz.answer(&mut session, 0, 2).unwrap();
    session.abandon();

    assert_eq!(
        quiz.advance(&mut session, progress).unwrap_err(),
        QuizError::Abandoned
    );
    assert!(progress.results().is_empty());
}

#[test]
fn second_answer_to_a_question_changes_nothing() {
    let quiz = QuizService::new(fixed_clock());
    let mut session = quiz.start_quiz(
        CourseId::new(CourseId::MATH_ADVENTURE),
        None,
        ViewGeneration::new(),
    );

    let first = quiz.answer(&mut session, 0, 2).unwrap();
    assert!(first.correct);
    assert!(quiz.answer(&mut session, 0, 0).is_err());
    assert_eq!(session.correct_count(), 1);
    assert_eq!(session.current_feedback(), Some(first));
}

#[test]
fn quiz_master_needs_ninety() {
    let mut sessions = SessionManager::mock(fixed_clock());
    sessions.login(&child(8)).unwrap();
    let progress = sessions.active_mut().unwrap().progress_mut();
    let math = CourseId::new(CourseId::MATH_ADVENTURE);

    let near = progress.record_result(QuizResult::new(math.clone(), 89.0, fixed_now()).unwrap());
    assert!(near.is_empty());
    let hit = progress.record_result(QuizResult::new(math.clone(), 90.0, fixed_now()).unwrap());
    assert_eq!(hit, vec![BadgeId::QuizMaster]);
    let again = progress.record_result(QuizResult::new(math, 100.0, fixed_now()).unwrap());
    assert!(again.is_empty());
}

#[tokio::test(start_paused = true)]
async fn feedback_shows_before_advancing() {
    let timings = Timings {
        answer_feedback: Duration::from_millis(1500),
        ..Timings::default()
    };
    let quiz = QuizService::new(fixed_clock()).with_timings(timings);
    let mut sessions = SessionManager::mock(fixed_clock());
    sessions.login(&child(8)).unwrap();
    let progress = sessions.active_mut().unwrap().progress_mut();

    let mut session = quiz.start_quiz(
        CourseId::new(CourseId::MATH_ADVENTURE),
        None,
        ViewGeneration::new(),
    );
    quiz.answer(&mut session, 0, 2).unwrap();

    let started = tokio::time::Instant::now();
    let step = quiz.advance_after_feedback(&mut session, progress).await.unwrap();
    assert_eq!(step, Some(QuizStep::Next(1)));
    assert!(started.elapsed() >= Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn logout_mid_feedback_discards_the_attempt() {
    let quiz = QuizService::new(fixed_clock());
    let mut sessions = SessionManager::mock(fixed_clock());
    let view = sessions.login(&child(8)).unwrap().child_view();

    let mut session = quiz.start_quiz(CourseId::new(CourseId::MATH_ADVENTURE), None, view);
    quiz.answer(&mut session, 0, 2).unwrap();
    let pending = session.schedule_advance(Duration::from_millis(1500));
    sessions.logout();

    assert!(pending.fire().await.is_none());
    assert!(session.is_abandoned());
    assert!(sessions.active().is_err());
}

#[tokio::test(start_paused = true)]
async fn logout_drops_a_pending_helper_reply() {
    let mut sessions = SessionManager::mock(fixed_clock());
    let view = sessions.login(&child(8)).unwrap().child_view();
    let mut chat = HelperChat::new(Duration::from_millis(1000), view);
    chat.open();

    let reply = chat
        .send("what is a fraction?", &mut StdRng::seed_from_u64(4))
        .unwrap();
    sessions.logout();

    reply.elapsed().await;
    assert!(!chat.deliver(reply));
    assert_eq!(chat.messages().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn unanswered_question_fails_without_waiting() {
    let quiz = QuizService::new(fixed_clock());
    let mut sessions = SessionManager::mock(fixed_clock());
    sessions.login(&child(8)).unwrap();
    let progress = sessions.active_mut().unwrap().progress_mut();
    let mut session = quiz.start_quiz(
        CourseId::new(CourseId::MATH_ADVENTURE),
        None,
        ViewGeneration::new(),
    );

    let started = tokio::time::Instant::now();
    assert_eq!(
        quiz.advance_after_feedback(&mut session, progress)
            .await
            .unwrap_err(),
        QuizError::AwaitingAnswer
    );
    assert!(started.elapsed() < Duration::from_millis(1500));
    assert_eq!(session.current_index(), 0);
}
