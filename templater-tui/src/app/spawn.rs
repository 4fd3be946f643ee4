use std::{sync::atomic::Ordering, thread};
use templater_core::{
    context::AppContext, draft::PullRequestDraft, event::AppEvent, machine::StateMachine,
};

use super::EventSender;

pub(super) fn spawn_submission(ctx: &AppContext, sender: &EventSender, draft: PullRequestDraft) {
    let ctx = ctx.clone();
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.cancel.load(Ordering::Relaxed) {
            return;
        }
        let result = StateMachine::submit(&ctx, &draft);
        if sender.cancel.load(Ordering::Relaxed) {
            log::debug!("Dropping submission result after quit");
            return;
        }
        sender.send(AppEvent::SubmissionFinished(result));
    });
}
