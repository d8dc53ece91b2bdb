//! Course catalog, read through the site's own proxy routes

use super::{ApiError, ClientConfig, execute, http_client};
use crate::types::{
    CatalogCourse, CatalogCourseDetails, CatalogInstructor, CatalogLesson, CatalogPage,
    CatalogSection, Refs, SyllabusSection,
};
use chrono::Utc;
use mentorhub_core::TtlCache;
use reqwest::{Client, Method, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;

/// Proxy prefix used when nothing else is configured
pub const DEFAULT_CATALOG_URL: &str = "http://localhost:3000/api/stepik";

/// Language of the course listing
const LISTING_LANGUAGE: &str = "ru";

fn join_ids(ids: &[u64]) -> String {
    ids.iter().map(u64::to_string).collect::<Vec<_>>().join(",")
}

/// Public client for the catalog proxy. No credentials are sent.
///
/// Successful reads are memoised per resource for a few minutes; clones
/// share the memo.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    cache: Arc<TtlCache<CatalogPage>>,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_cache(base_url, TtlCache::default())
    }

    /// Client whose memo keeps responses for `ttl`
    pub fn with_cache_ttl(base_url: impl Into<String>, ttl: Duration) -> Result<Self, ApiError> {
        Self::with_cache(base_url, TtlCache::new(ttl))
    }

    fn with_cache(base_url: impl Into<String>, cache: TtlCache<CatalogPage>) -> Result<Self, ApiError> {
        let config = ClientConfig::default();
        Ok(Self {
            client: http_client(config.timeout, &config.user_agent)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: Arc::new(cache),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Drop every memoised response
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .request(Method::GET, format!("{}{}", self.base_url, path))
    }

    async fn page(&self, key: String, request: RequestBuilder) -> Result<CatalogPage, ApiError> {
        if let Some(hit) = self.cache.get(&key, Utc::now()) {
            tracing::trace!(%key, "catalog cache hit");
            return Ok(hit);
        }
        let page: CatalogPage = execute(request).await?;
        self.cache.insert(key, page.clone(), Utc::now());
        Ok(page)
    }

    pub async fn catalog_course(&self, course_id: u64) -> Result<CatalogCourse, ApiError> {
        let page = self
            .page(format!("course:{course_id}"), self.get(&format!("/courses/{course_id}")))
            .await?;
        page.courses
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Decode(format!("catalog returned no course {course_id}")))
    }

    pub async fn catalog_courses(&self, page: u32) -> Result<CatalogPage, ApiError> {
        let request = self
            .get("/courses")
            .query(&[("page", page.to_string().as_str()), ("language", LISTING_LANGUAGE)]);
        self.page(format!("courses:page:{page}"), request).await
    }

    pub async fn catalog_instructors(&self, ids: &[u64]) -> Result<Vec<CatalogInstructor>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = join_ids(ids);
        let request = self.get("/users").query(&[("ids", ids.as_str())]);
        let page = self.page(format!("users:{ids}"), request).await?;
        Ok(page.users)
    }

    pub async fn catalog_sections(&self, course_id: u64) -> Result<Vec<CatalogSection>, ApiError> {
        let request = self.get("/sections").query(&[("course", course_id)]);
        let page = self.page(format!("sections:{course_id}"), request).await?;
        Ok(page.sections)
    }

    /// Lessons by id. An empty id list short-circuits without a request.
    pub async fn catalog_lessons(&self, ids: &[u64]) -> Result<Vec<CatalogLesson>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = join_ids(ids);
        let request = self.get("/lessons").query(&[("ids", ids.as_str())]);
        let page = self.page(format!("lessons:{ids}"), request).await?;
        Ok(page.lessons)
    }

    /// Course with instructors resolved and the syllabus assembled
    #[tracing::instrument(skip(self))]
    pub async fn catalog_course_details(&self, course_id: u64) -> Result<CatalogCourseDetails, ApiError> {
        let course = self.catalog_course(course_id).await?;

        let instructors = match &course.instructors {
            Refs::Items(items) => items.clone(),
            Refs::Ids(ids) => self.catalog_instructors(ids).await?,
        };

        let sections = self.catalog_sections(course_id).await?;
        let lesson_ids: Vec<u64> = sections
            .iter()
            .flat_map(|section| section.lessons.ids())
            .collect();
        let lessons = self.catalog_lessons(&lesson_ids).await?;

        Ok(CatalogCourseDetails {
            syllabus: assemble_syllabus(sections, &lessons),
            instructors,
            course,
        })
    }
}

/// Resolve each section's lessons against the fetched lesson list, then order
/// lessons and sections by position. Lesson ids the catalog did not return
/// are dropped; embedded lessons fall back to their own data.
pub fn assemble_syllabus(sections: Vec<CatalogSection>, lessons: &[CatalogLesson]) -> Vec<SyllabusSection> {
    let find = |id: u64| lessons.iter().find(|lesson| lesson.id == id);

    let mut syllabus: Vec<SyllabusSection> = sections
        .into_iter()
        .map(|section| {
            let mut resolved: Vec<CatalogLesson> = match section.lessons {
                Refs::Ids(ids) => ids.into_iter().filter_map(|id| find(id).cloned()).collect(),
                Refs::Items(items) => items
                    .into_iter()
                    .map(|lesson| find(lesson.id).cloned().unwrap_or(lesson))
                    .collect(),
            };
            resolved.sort_by_key(|lesson| lesson.position);
            SyllabusSection {
                id: section.id,
                title: section.title,
                position: section.position,
                lessons: resolved,
            }
        })
        .collect();
    syllabus.sort_by_key(|section| section.position);
    syllabus
}
