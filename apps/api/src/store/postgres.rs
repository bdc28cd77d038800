use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumePatch, ResumeRow, ResumeSummary, ResumeWithSections};
use crate::models::section::{NewSection, SectionPatch, SectionRow};
use crate::models::user::User;
use crate::store::ResumeStore;

const SECTIONS_BY_RESUME: &str =
    "SELECT * FROM sections WHERE resume_id = $1 ORDER BY position ASC, created_at ASC, id ASC";

/// PostgreSQL-backed store. Multi-row writes run inside a single transaction.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn sections_for<'e, E>(executor: E, resume_id: Uuid) -> Result<Vec<SectionRow>, AppError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        Ok(sqlx::query_as::<_, SectionRow>(SECTIONS_BY_RESUME)
            .bind(resume_id)
            .fetch_all(executor)
            .await?)
    }

    /// Bumps `updated_at` on an owned resume. Returns false when the resume
    /// does not exist or belongs to another user.
    async fn touch_resume(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE resumes SET updated_at = now() WHERE id = $1 AND user_id = $2")
                .bind(resume_id)
                .bind(user_id)
                .execute(&mut **tx)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_section(
        tx: &mut Transaction<'_, Postgres>,
        resume_id: Uuid,
        section: &NewSection,
    ) -> Result<SectionRow, AppError> {
        Ok(sqlx::query_as::<_, SectionRow>(
            r#"
            INSERT INTO sections (id, resume_id, section_type, title, content, position, is_visible)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(resume_id)
        .bind(&section.section_type)
        .bind(&section.title)
        .bind(&section.content)
        .bind(section.position)
        .bind(section.is_visible)
        .fetch_one(&mut **tx)
        .await?)
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn upsert_user(
        &self,
        external_id: &str,
        email: &str,
        name: Option<&str>,
    ) -> Result<User, AppError> {
        Ok(sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, external_id, email, name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (external_id) DO UPDATE
                SET email = EXCLUDED.email,
                    name = COALESCE(EXCLUDED.name, users.name)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(external_id)
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>, AppError> {
        Ok(sqlx::query_as::<_, ResumeSummary>(
            r#"
            SELECT id, title, slug, template, is_public, view_count, updated_at
            FROM resumes
            WHERE user_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_resume(&self, new_resume: NewResume) -> Result<ResumeWithSections, AppError> {
        let mut tx = self.pool.begin().await?;

        let resume = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (id, user_id, title, slug, template, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_resume.user_id)
        .bind(&new_resume.title)
        .bind(&new_resume.slug)
        .bind(&new_resume.template)
        .bind(new_resume.is_public)
        .fetch_one(&mut *tx)
        .await?;

        for section in &new_resume.sections {
            Self::insert_section(&mut tx, resume.id, section).await?;
        }
        let sections = Self::sections_for(&mut *tx, resume.id).await?;

        tx.commit().await?;

        info!(
            "Created resume {} with {} sections for user {}",
            resume.id,
            sections.len(),
            resume.user_id
        );
        Ok(ResumeWithSections { resume, sections })
    }

    async fn get_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<ResumeWithSections>, AppError> {
        let resume = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE id = $1 AND user_id = $2",
        )
        .bind(resume_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(resume) = resume else {
            return Ok(None);
        };
        let sections = Self::sections_for(&self.pool, resume.id).await?;
        Ok(Some(ResumeWithSections { resume, sections }))
    }

    async fn update_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        patch: &ResumePatch,
    ) -> Result<Option<ResumeRow>, AppError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes
            SET title = COALESCE($3, title),
                template = COALESCE($4, template),
                is_public = COALESCE($5, is_public),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(resume_id)
        .bind(user_id)
        .bind(patch.title.as_deref())
        .bind(patch.template.as_deref())
        .bind(patch.is_public)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_resume(&self, user_id: Uuid, resume_id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM sections
            WHERE resume_id IN (SELECT id FROM resumes WHERE id = $1 AND user_id = $2)
            "#,
        )
        .bind(resume_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    async fn create_section(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        new_section: NewSection,
    ) -> Result<Option<SectionRow>, AppError> {
        let mut tx = self.pool.begin().await?;
        if !Self::touch_resume(&mut tx, user_id, resume_id).await? {
            return Ok(None);
        }
        let section = Self::insert_section(&mut tx, resume_id, &new_section).await?;
        tx.commit().await?;
        Ok(Some(section))
    }

    async fn get_section(
        &self,
        user_id: Uuid,
        section_id: Uuid,
    ) -> Result<Option<SectionRow>, AppError> {
        Ok(sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT s.*
            FROM sections s
            JOIN resumes r ON r.id = s.resume_id
            WHERE s.id = $1 AND r.user_id = $2
            "#,
        )
        .bind(section_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn update_section(
        &self,
        user_id: Uuid,
        section_id: Uuid,
        patch: &SectionPatch,
    ) -> Result<Option<SectionRow>, AppError> {
        let mut tx = self.pool.begin().await?;

        let section = sqlx::query_as::<_, SectionRow>(
            r#"
            UPDATE sections s
            SET section_type = COALESCE($3, s.section_type),
                title = COALESCE($4, s.title),
                content = COALESCE($5, s.content),
                position = COALESCE($6, s.position),
                is_visible = COALESCE($7, s.is_visible),
                updated_at = now()
            FROM resumes r
            WHERE s.id = $1 AND r.id = s.resume_id AND r.user_id = $2
            RETURNING s.*
            "#,
        )
        .bind(section_id)
        .bind(user_id)
        .bind(patch.section_type.as_deref())
        .bind(patch.title.as_deref())
        .bind(patch.content.as_ref())
        .bind(patch.position)
        .bind(patch.is_visible)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(section) = &section {
            Self::touch_resume(&mut tx, user_id, section.resume_id).await?;
        }
        tx.commit().await?;
        Ok(section)
    }

    async fn delete_section(&self, user_id: Uuid, section_id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let resume_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            DELETE FROM sections s
            USING resumes r
            WHERE s.id = $1 AND r.id = s.resume_id AND r.user_id = $2
            RETURNING s.resume_id
            "#,
        )
        .bind(section_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(resume_id) = resume_id {
            Self::touch_resume(&mut tx, user_id, resume_id).await?;
        }
        tx.commit().await?;
        Ok(resume_id.is_some())
    }

    async fn set_section_positions(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        positions: &[(Uuid, i32)],
    ) -> Result<Option<Vec<SectionRow>>, AppError> {
        let mut tx = self.pool.begin().await?;
        if !Self::touch_resume(&mut tx, user_id, resume_id).await? {
            return Ok(None);
        }

        for (section_id, position) in positions {
            sqlx::query(
                "UPDATE sections SET position = $1, updated_at = now() WHERE id = $2 AND resume_id = $3",
            )
            .bind(position)
            .bind(section_id)
            .bind(resume_id)
            .execute(&mut *tx)
            .await?;
        }

        let sections = Self::sections_for(&mut *tx, resume_id).await?;
        tx.commit().await?;
        Ok(Some(sections))
    }

    async fn view_public_resume(
        &self,
        slug: &str,
    ) -> Result<Option<ResumeWithSections>, AppError> {
        let resume = sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes
            SET view_count = view_count + 1
            WHERE slug = $1 AND is_public
            RETURNING *
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        let Some(resume) = resume else {
            return Ok(None);
        };
        let sections = Self::sections_for(&self.pool, resume.id).await?;
        Ok(Some(ResumeWithSections { resume, sections }))
    }
}
