//! Screen models composed from the session, the record store and the
//! generic table view.

use serde::Serialize;
use table_view::{Action, Align, Cell, Column, Filter, FilterOption, SortValue, TablePage, TableView};
use utoipa::ToSchema;

use super::{Dashboard, Identity, PurchaseHistory, Screen, User, UserRole};

/// Points at or above which a member counts as "high".
pub const HIGH_POINTS: u32 = 200;
/// Points at or above which a member counts as "medium".
pub const MEDIUM_POINTS: u32 = 100;

fn points_band(value: &str, points: u32) -> bool {
    match value {
        "high" => points >= HIGH_POINTS,
        "medium" => (MEDIUM_POINTS..HIGH_POINTS).contains(&points),
        "low" => points < MEDIUM_POINTS,
        _ => true,
    }
}

fn status_badge(user: &User) -> Cell {
    let tone = if user.is_active() { "blue" } else { "gray" };
    Cell::badge(user.status_label(), tone)
}

/// Link to the JSON detail of a member.
pub fn user_detail_href(user: &User) -> String {
    format!("/api/v1/admin/users/{}", user.id())
}

/// "User Management" table over member accounts.
///
/// Search matches name or email case-insensitively; the "Filter Points"
/// control buckets members by available points.
///
/// # Examples
/// ```
/// use pergamino::domain::{SeedRecords, UserRole, user_management_table};
/// use table_view::TableState;
///
/// let records = SeedRecords::bundled().expect("bundled fixture");
/// let members: Vec<_> = records
///     .users()
///     .iter()
///     .filter(|u| u.role() == UserRole::User)
///     .cloned()
///     .collect();
/// let view = user_management_table(20);
/// let mut state = TableState::for_view(&view);
/// state.select_filter(&view, "high").expect("known option");
/// assert_eq!(view.process(&state, &members).len(), 6);
/// ```
pub fn user_management_table(page_size: usize) -> TableView<User> {
    TableView::builder("User Management", |user: &User| user.id().to_string())
        .column(
            Column::new("name", "Name", |user: &User| Cell::strong(user.name().as_ref()))
                .sortable_by(|user| SortValue::text(user.name().as_ref())),
        )
        .column(
            Column::new("email", "Email", |user: &User| Cell::text(user.email().as_ref()))
                .sortable_by(|user| SortValue::text(user.email().as_ref())),
        )
        .column(
            Column::new("points", "Available Points", |user: &User| {
                Cell::badge(user.points().to_string(), "teal")
            })
            .sortable_by(|user| SortValue::from(user.points()))
            .align(Align::Right),
        )
        .column(
            Column::new("pointsSpent", "Points Spent", |user: &User| {
                Cell::badge(user.points_spent().to_string(), "orange")
            })
            .sortable_by(|user| SortValue::from(user.points_spent()))
            .align(Align::Right),
        )
        .column(Column::new("status", "Status", status_badge).align(Align::Right))
        .search(|term, user: &User| {
            let needle = term.to_lowercase();
            user.name().as_ref().to_lowercase().contains(&needle)
                || user.email().as_ref().to_lowercase().contains(&needle)
        })
        .filter(Filter::new(
            "Filter Points",
            vec![
                FilterOption::new("all", "All Points"),
                FilterOption::new("high", "High (200+)"),
                FilterOption::new("medium", "Medium (100-199)"),
                FilterOption::new("low", "Low (0-99)"),
            ],
            |value, user: &User| points_band(value, user.points()),
        ))
        .row_actions(|user: &User| vec![Action::new("view", "View").with_href(user_detail_href(user))])
        .page_size(page_size)
        .build()
}

/// "Administrator Management" table.
pub fn admin_management_table(page_size: usize) -> TableView<User> {
    TableView::builder("Administrator Management", |admin: &User| {
        admin.id().to_string()
    })
    .column(Column::new("name", "Name", |admin: &User| {
        Cell::strong(admin.name().as_ref())
    }))
    .column(Column::new("email", "Email", |admin: &User| {
        Cell::text(admin.email().as_ref())
    }))
    .column(Column::new("role", "Role", |admin: &User| {
        Cell::text(capitalise(admin.role().as_str()))
    }))
    .column(Column::new("status", "Status", status_badge).align(Align::Right))
    .row_actions(|admin: &User| {
        let base = format!("/api/v1/admin/admins/{}", admin.id());
        let mut actions = vec![Action::new("edit", "Edit").with_href(base.clone())];
        if admin.is_active() {
            actions.push(Action::new("deactivate", "Deactivate").with_href(format!("{base}/deactivate")));
        }
        actions
    })
    .top_action(Action::new("add", "Add Admin").with_href("/api/v1/admin/admins"))
    .page_size(page_size)
    .build()
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// "User Details" dialog content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    /// Account identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role wire name.
    pub role: String,
    /// "Active" or "Inactive".
    pub status: String,
    /// Points available.
    pub available_points: u32,
    /// Points redeemed.
    pub points_spent: u32,
    /// Available plus spent.
    pub total_points: u64,
}

impl From<&User> for UserDetail {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role().to_string(),
            status: user.status_label().to_owned(),
            available_points: user.points(),
            points_spent: user.points_spent(),
            total_points: user.total_points(),
        }
    }
}

/// Administrator record as returned by the admin actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    /// Account identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// "Active" or "Inactive".
    pub status: String,
}

impl From<&User> for AdminSummary {
    fn from(admin: &User) -> Self {
        Self {
            id: admin.id().to_string(),
            name: admin.name().to_string(),
            email: admin.email().to_string(),
            status: admin.status_label().to_owned(),
        }
    }
}

/// A tab in a screen's tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabLink {
    /// Caption.
    pub label: &'static str,
    /// Screen path.
    pub href: &'static str,
    /// Whether this tab is showing.
    pub active: bool,
}

fn tabs(entries: &[(&'static str, Screen)], active: Screen) -> Vec<TabLink> {
    entries
        .iter()
        .map(|&(label, screen)| TabLink {
            label,
            href: screen.path(),
            active: screen == active,
        })
        .collect()
}

/// `/admin`, `/admin/users` and `/admin/admins`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminScreen {
    /// Page heading.
    pub heading: &'static str,
    /// Line under the heading.
    pub description: &'static str,
    /// Tab strip.
    pub tabs: Vec<TabLink>,
    /// Table for the active tab.
    pub table: TablePage,
}

impl AdminScreen {
    /// Wrap a rendered table; `/admin` shows the user management tab.
    pub fn new(screen: Screen, table: TablePage) -> Self {
        let active = if screen == Screen::AdminAdmins {
            Screen::AdminAdmins
        } else {
            Screen::AdminUsers
        };
        Self {
            heading: "Admin Dashboard",
            description: "Manage users, view statistics, and handle administrative tasks.",
            tabs: tabs(
                &[
                    ("User Management", Screen::AdminUsers),
                    ("Admin Management", Screen::AdminAdmins),
                ],
                active,
            ),
            table,
        }
    }
}

/// Profile form, prefilled from the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    /// Card title.
    pub title: &'static str,
    /// Current display name.
    pub name: String,
    /// Current email.
    pub email: String,
}

impl From<&Identity> for ProfileForm {
    fn from(identity: &Identity) -> Self {
        Self {
            title: "Profile Information",
            name: identity.name.to_string(),
            email: identity.email.to_string(),
        }
    }
}

/// Body of a member screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "panel", rename_all = "camelCase")]
pub enum MemberPanel {
    /// "My Points".
    Points(Dashboard),
    /// "Purchase History".
    Purchases(PurchaseHistory),
    /// "Profile".
    Profile(ProfileForm),
}

impl MemberPanel {
    fn screen(&self) -> Screen {
        match self {
            Self::Points(_) => Screen::Dashboard,
            Self::Purchases(_) => Screen::Purchases,
            Self::Profile(_) => Screen::Profile,
        }
    }
}

/// `/dashboard`, `/dashboard/purchases` and `/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberScreen {
    /// "Welcome, {name}".
    pub heading: String,
    /// Line under the heading.
    pub description: &'static str,
    /// Tab strip.
    pub tabs: Vec<TabLink>,
    /// Active panel.
    #[serde(flatten)]
    pub panel: MemberPanel,
}

impl MemberScreen {
    /// Wrap a panel for `identity`.
    pub fn new(identity: &Identity, panel: MemberPanel) -> Self {
        Self {
            heading: format!("Welcome, {}", identity.name),
            description: "Manage your profile, view purchase history, and track your points.",
            tabs: tabs(
                &[
                    ("My Points", Screen::Dashboard),
                    ("Purchase History", Screen::Purchases),
                    ("Profile", Screen::Profile),
                ],
                panel.screen(),
            ),
            panel,
        }
    }
}

/// `/login` and `/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthScreen {
    /// Heading.
    pub title: &'static str,
    /// Line under the heading.
    pub subtitle: &'static str,
    /// Form fields in order.
    pub fields: Vec<&'static str>,
    /// Submit button caption.
    pub submit_label: &'static str,
    /// Endpoint the form posts to.
    pub action: &'static str,
    /// Demo credentials shown under the login form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub demo_accounts: Vec<&'static str>,
}

impl AuthScreen {
    /// Sign-in form.
    pub fn login() -> Self {
        Self {
            title: "Welcome Back",
            subtitle: "Sign in to your Pergamino account",
            fields: vec!["email", "password"],
            submit_label: "Sign In",
            action: "/api/v1/login",
            demo_accounts: vec![
                "Admin: admin@pergamino.com / admin123",
                "User: user@pergamino.com / user123",
            ],
        }
    }

    /// Sign-up form.
    pub fn register() -> Self {
        Self {
            title: "Create Account",
            subtitle: "Join the Pergamino coffee community",
            fields: vec!["name", "email", "password", "confirmPassword"],
            submit_label: "Create Account",
            action: "/api/v1/register",
            demo_accounts: Vec::new(),
        }
    }
}

/// Member accounts only, in store order.
pub fn members(users: &[User]) -> Vec<User> {
    users
        .iter()
        .filter(|user| user.role() == UserRole::User)
        .cloned()
        .collect()
}
