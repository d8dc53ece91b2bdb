//! Course, lesson and review endpoints

use super::{ApiClient, ApiError};
use crate::types::{
    Course, CourseEnrollment, CourseInput, CourseWithEnrollment, CourseWithLessons, Lesson,
    LessonInput, Review, ReviewInput, SimilarCourse,
};
use mentorhub_core::Paginated;
use reqwest::Method;

impl ApiClient {
    pub async fn list_courses(&self, skip: u32, limit: u32) -> Result<Vec<Course>, ApiError> {
        let request = self
            .request(Method::GET, "/courses")
            .query(&[("skip", skip), ("limit", limit)]);
        self.execute(request).await
    }

    pub async fn my_courses(&self) -> Result<Vec<CourseWithEnrollment>, ApiError> {
        let request = self.authorized(Method::GET, "/courses/my")?;
        self.execute(request).await
    }

    pub async fn get_course(&self, id: i64) -> Result<CourseWithLessons, ApiError> {
        let request = self.request(Method::GET, &format!("/courses/{id}"));
        self.execute(request).await
    }

    pub async fn create_course(&self, data: &CourseInput) -> Result<Course, ApiError> {
        let request = self.authorized(Method::POST, "/courses")?.json(data);
        self.execute(request).await
    }

    pub async fn update_course(&self, id: i64, data: &CourseInput) -> Result<Course, ApiError> {
        let request = self
            .authorized(Method::PUT, &format!("/courses/{id}"))?
            .json(data);
        self.execute(request).await
    }

    pub async fn delete_course(&self, id: i64) -> Result<(), ApiError> {
        let request = self.authorized(Method::DELETE, &format!("/courses/{id}"))?;
        self.execute(request).await
    }

    pub async fn enroll(&self, course_id: i64) -> Result<CourseEnrollment, ApiError> {
        let request = self.authorized(Method::POST, &format!("/courses/{course_id}/enroll"))?;
        self.execute(request).await
    }

    pub async fn course_lessons(&self, course_id: i64) -> Result<Vec<Lesson>, ApiError> {
        let request = self.request(Method::GET, &format!("/courses/{course_id}/lessons"));
        self.execute(request).await
    }

    pub async fn create_lesson(&self, course_id: i64, data: &LessonInput) -> Result<Lesson, ApiError> {
        let request = self
            .authorized(Method::POST, &format!("/courses/{course_id}/lessons"))?
            .json(data);
        self.execute(request).await
    }

    pub async fn update_lesson(&self, lesson_id: i64, data: &LessonInput) -> Result<Lesson, ApiError> {
        let request = self
            .authorized(Method::PUT, &format!("/courses/lessons/{lesson_id}"))?
            .json(data);
        self.execute(request).await
    }

    pub async fn delete_lesson(&self, lesson_id: i64) -> Result<(), ApiError> {
        let request = self.authorized(Method::DELETE, &format!("/courses/lessons/{lesson_id}"))?;
        self.execute(request).await
    }

    /// One page of course reviews. Reading reviews needs a signed-in user.
    pub async fn course_reviews(
        &self,
        course_id: i64,
        page: u32,
        page_size: u32,
    ) -> Result<Paginated<Review>, ApiError> {
        let request = self
            .authorized(Method::GET, &format!("/courses/{course_id}/reviews"))?
            .query(&[("page", page), ("page_size", page_size)]);
        let reviews: Paginated<Review> = self.execute(request).await?;
        if !reviews.is_consistent() {
            tracing::warn!(
                course_id,
                total = reviews.total,
                total_pages = reviews.total_pages,
                "inconsistent review page envelope"
            );
        }
        Ok(reviews)
    }

    pub async fn create_review(&self, course_id: i64, review: &ReviewInput) -> Result<Review, ApiError> {
        let request = self
            .authorized(Method::POST, &format!("/courses/{course_id}/reviews"))?
            .json(review);
        self.execute(request).await
    }

    pub async fn similar_courses(&self, course_id: i64) -> Result<Vec<SimilarCourse>, ApiError> {
        let request = self.request(Method::GET, &format!("/courses/{course_id}/similar"));
        self.execute(request).await
    }
}
