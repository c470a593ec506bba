//! Plain-text rendering for the command line

use std::fmt::Write;

use textwrap::{Options, wrap};

use crate::advisor::{Advice, AiQuest, AiRecommendation, AiStudyTip};
use crate::ledger::{Overview, WeeklyProgress};
use crate::model::{AppState, PastPaper, WeeklyQuest};
use crate::vault::{MarkResult, StudySite, VaultPaper};

const WIDTH: usize = 78;
const BAR_WIDTH: usize = 20;

/// Wrap `text` with a two-space indent
fn indented(out: &mut String, text: &str) {
    let opts = Options::new(WIDTH).initial_indent("  ").subsequent_indent("  ");
    for line in wrap(text, opts) {
        let _ = writeln!(out, "{}", line);
    }
}

fn bar(value: u32, max: u32) -> String {
    let filled = if max == 0 { 0 } else { (value as usize * BAR_WIDTH) / max as usize };
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn check(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

pub fn status(state: &AppState, overview: &Overview, weekly: &WeeklyProgress) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total XP {}  ·  {}/{} daily quests  ·  {} study days",
        overview.total_xp, overview.completed_quests, overview.total_quests, overview.streak_days
    );
    let _ = writeln!(out);
    for (subject, xp) in state.xp.iter() {
        let _ = writeln!(
            out,
            "  {:<20} {} {:>5}",
            subject.display_name(),
            bar(xp, overview.max_xp),
            xp
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}: {}/{} weekly quests ({:.0}%), {}/{} XP",
        weekly.label(),
        weekly.completed,
        weekly.total,
        weekly.percent(),
        weekly.earned_xp,
        weekly.potential_xp
    );
    let _ = writeln!(out, "Weakest subject: {}", overview.weakest.display_name());
    out
}

pub fn quests(state: &AppState, weekly: &[WeeklyQuest]) -> String {
    let mut out = String::from("Daily quests\n");
    for quest in &state.quests {
        let _ = writeln!(
            out,
            "  {} #{:<4} {} (+{} XP)",
            check(quest.completed),
            quest.id,
            quest.title,
            quest.xp
        );
    }
    let _ = writeln!(out, "\n{}", WeeklyProgress::of(weekly).label());
    for quest in weekly {
        let _ = writeln!(
            out,
            "  {} #{:<6} {} · {} · {} (+{} XP, {})",
            check(quest.completed),
            quest.id,
            quest.title,
            quest.subject,
            quest.difficulty,
            quest.xp,
            quest.estimated_time
        );
    }
    out
}

pub fn past_papers(papers: &[PastPaper]) -> String {
    if papers.is_empty() {
        return "No papers match.\n".to_string();
    }
    let mut out = String::new();
    for paper in papers {
        let _ = writeln!(
            out,
            "#{:<3} {} ({} {}, {} {}, {})",
            paper.id, paper.title, paper.board, paper.curriculum_code, paper.season, paper.year, paper.difficulty
        );
        indented(&mut out, &paper.topics.join(", "));
    }
    out
}

fn notice<T>(out: &mut String, advice: &Advice<T>) {
    if let Some(reason) = &advice.notice {
        let _ = writeln!(out, "(offline suggestion: {})", reason);
    }
}

pub fn tip(advice: &Advice<AiStudyTip>) -> String {
    let mut out = String::new();
    notice(&mut out, advice);
    let tip = &advice.value;
    let _ = writeln!(out, "{} [{:?}, {}]", tip.title, tip.priority, tip.estimated_time);
    indented(&mut out, &tip.content);
    if !tip.subjects.is_empty() {
        let _ = writeln!(out, "  Subjects: {}", tip.subjects.join(", "));
    }
    out
}

pub fn recommendations(advice: &Advice<Vec<AiRecommendation>>) -> String {
    let mut out = String::new();
    notice(&mut out, advice);
    let mut recs: Vec<_> = advice.value.iter().collect();
    recs.sort_by(|a, b| b.priority.cmp(&a.priority));
    for rec in recs {
        let _ = writeln!(out, "{:>2}  {} ({:?})", rec.priority, rec.title, rec.kind);
        indented(&mut out, &rec.description);
        if let Some(url) = &rec.action_url {
            let _ = writeln!(out, "  {}", url);
        }
    }
    out
}

pub fn ai_quests(advice: &Advice<Vec<AiQuest>>) -> String {
    let mut out = String::new();
    notice(&mut out, advice);
    for quest in &advice.value {
        let _ = writeln!(
            out,
            "{} · {} · {} (+{} XP, {})",
            quest.title, quest.subject, quest.difficulty, quest.xp, quest.estimated_time
        );
        indented(&mut out, &quest.description);
    }
    out
}

pub fn plan(advice: &Advice<String>) -> String {
    let mut out = String::new();
    notice(&mut out, advice);
    for line in advice.value.lines().map(str::trim).filter(|l| !l.is_empty()) {
        indented(&mut out, line);
    }
    out
}

pub fn vault_papers(papers: &[VaultPaper]) -> String {
    let mut out = String::new();
    for paper in papers {
        let _ = writeln!(
            out,
            "#{:<4} {:<32} {:<7} {}",
            paper.id,
            paper.title,
            paper.board.as_str(),
            paper.difficulty
        );
    }
    let _ = writeln!(out, "{} papers", papers.len());
    out
}

pub fn mark(id: u32, result: &MarkResult) -> String {
    format!(
        "Paper #{}: {}% ({}/{} correct)\n  {}\n",
        id, result.score, result.correct, result.total, result.feedback
    )
}

pub fn sites(sites: &[StudySite]) -> String {
    sites.iter().fold(String::new(), |mut out, site| {
        let _ = writeln!(out, "{:<26} {}", site.name, site.url);
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::fallback;
    use crate::model::SubjectXp;

    #[test]
    fn bar_is_proportional() {
        assert_eq!(bar(0, 0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(bar(60, 120).chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
        assert_eq!(bar(120, 120).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn status_lists_every_subject() {
        let state = AppState::seed();
        let text = status(&state, &Overview::of(&state), &WeeklyProgress::of(&[]));
        assert!(text.starts_with("Total XP 420"));
        assert!(text.contains("Computer Science"));
        assert!(text.contains("Week -: 0/0 weekly quests"));
    }

    #[test]
    fn fallback_advice_is_flagged() {
        let advice = Advice { value: fallback::study_plan(), notice: Some("offline mode".into()) };
        let text = plan(&advice);
        assert!(text.starts_with("(offline suggestion: offline mode)"));
        assert!(text.contains("  • Start with your weakest subject"));
    }

    #[test]
    fn long_tips_are_wrapped() {
        let advice = Advice { value: fallback::study_tip(&SubjectXp::default()), notice: None };
        let text = tip(&advice);
        assert!(text.lines().all(|l| l.chars().count() <= WIDTH));
    }

    #[test]
    fn recommendations_sorted_by_priority() {
        let advice = Advice { value: fallback::recommendations(), notice: None };
        let text = recommendations(&advice);
        let first = text.lines().next().unwrap();
        assert!(first.contains("Practice past papers"));
    }
}
