use std::cell::RefCell;
use std::rc::Rc;

use theatrum_core::{NOTICE_VISIBLE_MS, Notice, NoticeSlot};
use yew::prelude::*;

use crate::dom;

/// Shell-level UI state: the toast slot and the auth modal flag.
#[derive(Clone)]
pub struct AppState {
    pub notices: Rc<RefCell<NoticeSlot>>,
    pub auth_open: UseStateHandle<bool>,
    refresh: UseForceUpdateHandle,
}

impl AppState {
    /// Show `notice` now and hide it after the visibility window, unless a
    /// newer notice replaced it in the meantime.
    pub fn notify(&self, notice: Notice) {
        log::debug!("notice ({}): {}", notice.kind.as_str(), notice.message);
        let ticket = self.notices.borrow_mut().show(notice);
        self.refresh.force_update();
        let notices = self.notices.clone();
        let refresh = self.refresh.clone();
        dom::run_after(NOTICE_VISIBLE_MS, move || {
            if notices.borrow_mut().expire(ticket) {
                refresh.force_update();
            }
        });
    }

    #[must_use]
    pub fn notice_callback(&self) -> Callback<Notice> {
        let state = self.clone();
        Callback::from(move |notice| state.notify(notice))
    }

    #[must_use]
    pub fn current_notice(&self) -> Option<Notice> {
        self.notices.borrow().current().cloned()
    }
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        notices: use_mut_ref(NoticeSlot::default),
        auth_open: use_state(|| false),
        refresh: use_force_update(),
    }
}
