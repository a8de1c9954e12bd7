//! One bar event: attendance, attendees, pictures and photo upload
//!
//! `is_checked_in` mirrors the server. It is set from the attendance read and
//! changed by a check-in or check-out only after the server answered 2xx.

use super::{abandon, settle, Fetch, WriteOutcome};
use crate::egui_app::api::ApiClient;
use crate::egui_app::load::{LoadAction, LoadState};
use crate::egui_app::notice::Notices;
use crate::egui_app::tasks::{take_ready, Scope};
use crate::shared::models::{Attendance, BarEvent, EventPicture, NewEventPicture, User};
use std::path::PathBuf;

#[derive(Default)]
pub struct EventScreen {
    scope: Scope,
    event: Option<BarEvent>,
    attendance: LoadState<Attendance>,
    pending_attendance: Fetch<Attendance>,
    is_checked_in: bool,
    /// Check-in (`true`) or check-out (`false`) awaiting the server
    attendance_write: Option<bool>,
    pending_write: Fetch<()>,
    attendees: LoadState<Vec<User>>,
    pending_attendees: Fetch<Vec<User>>,
    pictures: LoadState<Vec<EventPicture>>,
    pending_pictures: Fetch<Vec<EventPicture>>,
    pub upload_path: String,
    pub upload_description: String,
    tagged: Vec<i64>,
    pending_upload: Fetch<EventPicture>,
}

impl EventScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `event`, discarding whatever the previous event had in flight
    pub fn open(&mut self, api: &ApiClient, event: BarEvent) {
        self.scope.invalidate();
        let event_id = event.id;
        *self = Self {
            scope: self.scope.clone(),
            event: Some(event),
            ..Self::default()
        };

        if api.is_authenticated() {
            self.attendance.dispatch(LoadAction::Start);
            let client = api.clone();
            self.pending_attendance =
                Some(self.scope.spawn(async move { client.get_attendance(event_id).await }));
        }

        self.attendees.dispatch(LoadAction::Start);
        let client = api.clone();
        self.pending_attendees = Some(self.scope.spawn(async move { client.get_attendees(event_id).await }));

        self.pictures.dispatch(LoadAction::Start);
        let client = api.clone();
        self.pending_pictures =
            Some(self.scope.spawn(async move { client.get_event_pictures(event_id).await }));
    }

    pub fn event(&self) -> Option<&BarEvent> {
        self.event.as_ref()
    }

    pub fn check_in(&mut self, api: &ApiClient) -> WriteOutcome {
        self.write_attendance(api, true)
    }

    pub fn check_out(&mut self, api: &ApiClient) -> WriteOutcome {
        self.write_attendance(api, false)
    }

    fn write_attendance(&mut self, api: &ApiClient, attend: bool) -> WriteOutcome {
        if !api.is_authenticated() {
            return WriteOutcome::LoginRequired;
        }
        if self.pending_write.is_some() {
            return WriteOutcome::Busy;
        }
        let Some(event_id) = self.event.as_ref().map(|e| e.id) else {
            return WriteOutcome::Invalid("No event selected".to_string());
        };

        tracing::info!("{} event {}", if attend { "Checking in to" } else { "Checking out of" }, event_id);
        let client = api.clone();
        self.pending_write = Some(self.scope.spawn(async move {
            if attend {
                client.check_in(event_id).await
            } else {
                client.check_out(event_id).await
            }
        }));
        self.attendance_write = Some(attend);
        WriteOutcome::Started
    }

    pub fn toggle_tag(&mut self, user_id: i64) {
        match self.tagged.iter().position(|id| *id == user_id) {
            Some(pos) => {
                self.tagged.remove(pos);
            }
            None => self.tagged.push(user_id),
        }
    }

    pub fn is_tagged(&self, user_id: i64) -> bool {
        self.tagged.contains(&user_id)
    }

    pub fn upload(&mut self, api: &ApiClient) -> WriteOutcome {
        if !api.is_authenticated() {
            return WriteOutcome::LoginRequired;
        }
        if self.pending_upload.is_some() {
            return WriteOutcome::Busy;
        }
        let Some(event_id) = self.event.as_ref().map(|e| e.id) else {
            return WriteOutcome::Invalid("No event selected".to_string());
        };
        let picture = NewEventPicture {
            image_path: PathBuf::from(self.upload_path.trim()),
            description: self.upload_description.trim().to_string(),
            tagged_user_ids: self.tagged.clone(),
        };
        if let Err(e) = picture.validate() {
            return WriteOutcome::invalid(e);
        }

        let client = api.clone();
        self.pending_upload = Some(
            self.scope
                .spawn(async move { client.upload_event_picture(event_id, &picture).await }),
        );
        WriteOutcome::Started
    }

    pub fn poll(&mut self, notices: &mut Notices) {
        if let Some(result) = take_ready(&mut self.pending_attendance) {
            if let Ok(attendance) = &result {
                self.is_checked_in = attendance.attending;
            }
            self.attendance.finish("attendance", result);
        }
        settle(&mut self.attendees, &mut self.pending_attendees, "attendees");
        settle(&mut self.pictures, &mut self.pending_pictures, "event pictures");

        if let Some(result) = take_ready(&mut self.pending_write) {
            let attend = self.attendance_write.take().unwrap_or(true);
            match result {
                Ok(()) => {
                    self.is_checked_in = attend;
                    notices.info(if attend { "Checked in" } else { "Checked out" });
                }
                Err(e) => {
                    let verb = if attend { "check in" } else { "check out" };
                    notices.error(format!("Could not {}: {}", verb, e.user_message()));
                }
            }
        }

        if let Some(result) = take_ready(&mut self.pending_upload) {
            match result {
                Ok(picture) => {
                    if let Some(pictures) = self.pictures.data_mut() {
                        pictures.insert(0, picture);
                    }
                    self.upload_path.clear();
                    self.upload_description.clear();
                    self.tagged.clear();
                    notices.info("Photo uploaded");
                }
                Err(e) => notices.error(format!("Upload failed: {}", e.user_message())),
            }
        }
    }

    pub fn unmount(&mut self) {
        self.scope.invalidate();
        abandon(&mut self.attendance, &mut self.pending_attendance);
        abandon(&mut self.attendees, &mut self.pending_attendees);
        abandon(&mut self.pictures, &mut self.pending_pictures);
        self.pending_write = None;
        self.attendance_write = None;
        self.pending_upload = None;
    }

    pub fn is_checked_in(&self) -> bool {
        self.is_checked_in
    }

    pub fn attendance(&self) -> &LoadState<Attendance> {
        &self.attendance
    }

    pub fn attendees(&self) -> &LoadState<Vec<User>> {
        &self.attendees
    }

    pub fn pictures(&self) -> &LoadState<Vec<EventPicture>> {
        &self.pictures
    }

    pub fn is_writing(&self) -> bool {
        self.pending_write.is_some()
    }

    pub fn is_uploading(&self) -> bool {
        self.pending_upload.is_some()
    }

    /// Requests still outstanding
    pub fn in_flight(&self) -> usize {
        [
            self.pending_attendance.is_some(),
            self.pending_attendees.is_some(),
            self.pending_pictures.is_some(),
            self.pending_write.is_some(),
            self.pending_upload.is_some(),
        ]
        .into_iter()
        .filter(|busy| *busy)
        .count()
    }
}
