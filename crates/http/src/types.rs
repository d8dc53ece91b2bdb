//! Request and response bodies of the MentorHub backend and the course catalog
//!
//! Timestamps are kept as the ISO-8601 strings the backend sends; some
//! endpoints omit the offset, so they are not parsed eagerly.

use serde::{Deserialize, Serialize};

// Auth

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Mentor,
}

impl UserRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Mentor => "mentor",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterData {
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    pub created_at: String,
}

impl User {
    /// Full name when set, otherwise the username
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

// Mentors

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub total_sessions: Option<u32>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Mentor search filters. Only the fields that are set end up in the query
/// string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MentorFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorsResponse {
    pub mentors: Vec<Mentor>,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

// Sessions

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Time filter for the "my sessions" listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionFilter {
    Upcoming,
    Past,
}

impl SessionFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Past => "past",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonRef {
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub mentor_id: i64,
    pub student_id: i64,
    #[serde(default)]
    pub mentor_name: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    pub topic: String,
    pub scheduled_time: String,
    pub duration: u32,
    #[serde(default)]
    pub price: f64,
    pub status: SessionStatus,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub mentor: Option<PersonRef>,
    #[serde(default)]
    pub student: Option<PersonRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub mentor_id: i64,
    pub topic: String,
    pub scheduled_time: String,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial session update; unset fields are left untouched by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// Courses

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorRef {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub duration_hours: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub instructor_id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub instructor: Option<InstructorRef>,
}

/// Writable course fields for create and update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub is_preview: bool,
}

/// Writable lesson fields for create and update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_preview: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseWithLessons {
    #[serde(flatten)]
    pub course: Course,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEnrollment {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    #[serde(default)]
    pub progress_percent: f64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseWithEnrollment {
    #[serde(flatten)]
    pub course: Course,
    #[serde(default)]
    pub enrollment: Option<CourseEnrollment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewInput {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarCourse {
    pub course_id: i64,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub total_reviews: u64,
}

// Progress

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub course_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<i64>,
    pub progress_percent: f64,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub course_id: i64,
    #[serde(default)]
    pub lesson_id: Option<i64>,
    #[serde(default)]
    pub progress_percent: f64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// Dashboard

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_courses: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub total_sessions: u64,
    pub upcoming_sessions: u64,
    pub completed_sessions: u64,
    pub total_reviews: u64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingSession {
    pub id: i64,
    pub mentor_name: String,
    pub topic: String,
    pub scheduled_time: String,
    pub duration: u32,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    CourseStarted,
    CourseCompleted,
    SessionCompleted,
    ReviewPosted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub timestamp: String,
    #[serde(default)]
    pub icon_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    #[serde(default)]
    pub upcoming_sessions: Vec<UpcomingSession>,
    #[serde(default)]
    pub recent_activities: Vec<RecentActivity>,
}

// Achievements

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub earned_at: String,
}

// Course catalog

/// A list of references that the catalog returns either as bare ids or as
/// embedded objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Refs<T> {
    Ids(Vec<u64>),
    Items(Vec<T>),
}

impl<T> Default for Refs<T> {
    fn default() -> Self {
        Self::Ids(Vec::new())
    }
}

impl<T: HasId> Refs<T> {
    pub fn ids(&self) -> Vec<u64> {
        match self {
            Self::Ids(ids) => ids.clone(),
            Self::Items(items) => items.iter().map(HasId::id).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Ids(ids) => ids.is_empty(),
            Self::Items(items) => items.is_empty(),
        }
    }
}

pub trait HasId {
    fn id(&self) -> u64;
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSummary {
    pub average: f64,
    pub total: u64,
    pub distribution: Vec<u64>,
}

/// The catalog sends a summary id in course listings and the summary object
/// when it was requested explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewSummaryRef {
    Id(u64),
    Summary(ReviewSummary),
}

impl ReviewSummaryRef {
    pub const fn summary(&self) -> Option<&ReviewSummary> {
        match self {
            Self::Id(_) => None,
            Self::Summary(summary) => Some(summary),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogCourse {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub summary: String,
    pub cover: Option<String>,
    pub language: String,
    pub is_public: bool,
    pub instructors: Refs<CatalogInstructor>,
    pub sections: Refs<CatalogSection>,
    pub learners_count: u64,
    pub review_summary: Option<ReviewSummaryRef>,
    pub workload: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogInstructor {
    pub id: u64,
    #[serde(alias = "full_name")]
    pub name: String,
    pub avatar: Option<String>,
    #[serde(alias = "short_bio")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub id: u64,
    pub title: String,
    pub position: i64,
    pub lessons: Refs<CatalogLesson>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogLesson {
    pub id: u64,
    pub title: String,
    pub position: i64,
}

impl HasId for CatalogInstructor {
    fn id(&self) -> u64 {
        self.id
    }
}

impl HasId for CatalogSection {
    fn id(&self) -> u64 {
        self.id
    }
}

impl HasId for CatalogLesson {
    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogMeta {
    pub page: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Envelope of every catalog response; only the collection matching the
/// requested resource is populated
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogPage {
    pub meta: CatalogMeta,
    pub courses: Vec<CatalogCourse>,
    pub users: Vec<CatalogInstructor>,
    pub sections: Vec<CatalogSection>,
    pub lessons: Vec<CatalogLesson>,
}

/// A section with its lessons resolved and ordered by position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllabusSection {
    pub id: u64,
    pub title: String,
    pub position: i64,
    pub lessons: Vec<CatalogLesson>,
}

/// Course with instructors resolved and the syllabus assembled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCourseDetails {
    pub course: CatalogCourse,
    pub instructors: Vec<CatalogInstructor>,
    pub syllabus: Vec<SyllabusSection>,
}
