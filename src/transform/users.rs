// Account and invitation records -> display rows for the admin pages

use chrono::DateTime;
use serde::Serialize;

use crate::format::full_name;
use crate::grid::{Column, Grid};
use crate::models::{Invitation, ManagedUser};

const EM_DASH: &str = "\u{2014}";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationRow {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub status: String,
    pub expires: String,
    pub invited_by: String,
}

pub fn transform_users(users: Vec<ManagedUser>) -> Vec<UserRow> {
    users.into_iter().map(user_row).collect()
}

fn user_row(u: ManagedUser) -> UserRow {
    let name = full_name(u.first_name.as_deref(), u.last_name.as_deref());
    UserRow {
        id: u.id,
        name: if name.is_empty() {
            EM_DASH.to_string()
        } else {
            name
        },
        email: u.email,
        role: u.role.as_str().to_string(),
        status: if u.is_active { "Active" } else { "Inactive" }.to_string(),
    }
}

pub fn transform_invitations(invitations: Vec<Invitation>) -> Vec<InvitationRow> {
    invitations.into_iter().map(invitation_row).collect()
}

fn invitation_row(i: Invitation) -> InvitationRow {
    let invited_by = match i.invited_by {
        Some(inviter) => {
            let name = full_name(inviter.first_name.as_deref(), inviter.last_name.as_deref());
            if !name.is_empty() {
                name
            } else {
                inviter.email.unwrap_or_else(|| EM_DASH.to_string())
            }
        }
        None => EM_DASH.to_string(),
    };

    InvitationRow {
        id: i.id,
        email: i.email,
        role: i.role.as_str().to_uppercase(),
        status: if i.accepted { "Accepted" } else { "Pending" }.to_string(),
        expires: format_timestamp(i.expires_at.as_deref()),
        invited_by,
    }
}

/// "Mar 4, 2026, 05:30 PM" for RFC 3339 input; unparseable text passes
/// through as-is, absent renders as an em dash.
fn format_timestamp(value: Option<&str>) -> String {
    match value {
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
            Err(_) => raw.to_string(),
        },
        None => EM_DASH.to_string(),
    }
}

pub fn users_grid(rows: &[UserRow]) -> Grid {
    let columns = vec![
        Column::new("Name", 22),
        Column::new("Email", 28),
        Column::new("Role", 10),
        Column::new("Status", 10),
    ];

    let cells = rows
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.email.clone(),
                r.role.clone(),
                r.status.clone(),
            ]
        })
        .collect();

    Grid::new("Users", columns, cells)
}

pub fn invitations_grid(rows: &[InvitationRow]) -> Grid {
    let columns = vec![
        Column::new("Email", 28),
        Column::new("Role", 10),
        Column::new("Status", 10),
        Column::new("Expires", 22),
        Column::new("Invited By", 22),
    ];

    let cells = rows
        .iter()
        .map(|r| {
            vec![
                r.email.clone(),
                r.role.clone(),
                r.status.clone(),
                r.expires.clone(),
                r.invited_by.clone(),
            ]
        })
        .collect();

    Grid::new("Invitations", columns, cells).with_empty_state("No pending invitations")
}
