//! Subdomain creation orchestration.

use std::sync::Arc;

use chrono::Utc;

use crate::error::CoreResult;
use crate::ratelimit::Operation;
use crate::services::{PreflightValidator, ServiceContext};
use crate::types::{
    CreationLogEntry, CreationRequest, CreationResult, CreationStep, GeneratedContent,
    NewSubdomain, RequestContext, SiteConfig, StepReport, StepStatus,
};
use crate::validation::validate_subdomain_name;

/// Drives the creation saga: gates first, then resource provisioning in a
/// fixed order, aborting on the first failed step.
///
/// There is no automatic rollback. A failed run reports which steps finished
/// so an operator can clean up; already-provisioned resources are left in
/// place.
pub struct ProvisionService {
    ctx: Arc<ServiceContext>,
}

impl ProvisionService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Run the creation saga for `request`.
    ///
    /// Gate refusals (rate limit, invalid name, preflight conflicts) return
    /// `Err` before any resource is touched. Once provisioning starts,
    /// failures come back as `Ok` with `success == false` and the step
    /// reports accumulated so far.
    pub async fn create(
        &self,
        request: CreationRequest,
        caller: &RequestContext,
    ) -> CoreResult<CreationResult> {
        let audit = &self.ctx.audit;
        let origin = caller.remote_addr.as_str();

        if let Err(e) = self
            .ctx
            .rate_limiter
            .check(&caller.session_id, Operation::Creation)
        {
            audit
                .warning(
                    format!("Creation refused (rate limit): {}", request.name),
                    origin,
                )
                .await;
            return Err(e);
        }

        let name = match validate_subdomain_name(&request.name) {
            Ok(name) => name,
            Err(e) => {
                audit
                    .warning(format!("Creation refused: {e}"), origin)
                    .await;
                return Err(e);
            }
        };

        let preflight = PreflightValidator::new(self.ctx.clone());
        if let Err(e) = preflight.check(&name).await {
            audit
                .warning(format!("Creation refused for '{name}': {e}"), origin)
                .await;
            return Err(e);
        }

        audit
            .info(format!("Creating subdomain: {name}"), origin)
            .await;

        let result = self.run_saga(&name, &request, caller).await;
        if result.success {
            self.ctx
                .rate_limiter
                .record(&caller.session_id, Operation::Creation);
            audit
                .success(format!("Created subdomain: {name}"), origin)
                .await;
        } else {
            audit
                .error(
                    format!(
                        "Creation failed for '{name}': {}",
                        result.errors.join("; ")
                    ),
                    origin,
                )
                .await;
        }
        Ok(result)
    }

    async fn run_saga(
        &self,
        name: &str,
        request: &CreationRequest,
        caller: &RequestContext,
    ) -> CreationResult {
        let cfg = &self.ctx.config;
        let full_domain = cfg.full_domain(name);
        let database_name = cfg.database_name(name);
        let directory = cfg.directory_path(name);
        let mut result = CreationResult::empty();

        macro_rules! step {
            ($step:expr, $outcome:expr, $ok_msg:expr) => {
                match $outcome {
                    Ok(value) => {
                        result
                            .steps
                            .push(StepReport::new($step.as_str(), StepStatus::Success, $ok_msg));
                        result.completed_steps.push($step);
                        value
                    }
                    Err(e) => {
                        let message = e.to_string();
                        result.steps.push(StepReport::new(
                            $step.as_str(),
                            StepStatus::Error,
                            message.clone(),
                        ));
                        result.errors.push(message);
                        result.success = false;
                        return result;
                    }
                }
            };
        }

        step!(
            CreationStep::Hosting,
            self.ctx
                .hosting
                .create_subdomain(name, &cfg.root_domain, &cfg.document_root(name))
                .await,
            format!("Hosting subdomain created: {full_domain}")
        );

        let dns_record_id = step!(
            CreationStep::Dns,
            self.ctx.dns.create_record(&full_domain, &cfg.root_domain).await,
            format!("DNS record created: {full_domain}")
        );

        step!(
            CreationStep::Database,
            self.ctx.hosting.create_database(&database_name).await,
            format!("Database created: {database_name}")
        );

        step!(
            CreationStep::Directory,
            self.ctx.filesystem.create_tree(&cfg.directory_layout(name)).await,
            format!("Directory tree created: {}", directory.display())
        );

        // Content generation is best-effort: failure downgrades to fallback
        // content with a warning instead of aborting the run.
        let mut content_generated = false;
        let content = match (&self.ctx.content, request.skip_content) {
            (Some(generator), false) => match generator.generate(request).await {
                Ok(content) => {
                    content_generated = true;
                    result.steps.push(StepReport::new(
                        CreationStep::Content.as_str(),
                        StepStatus::Success,
                        "Site content generated",
                    ));
                    result.completed_steps.push(CreationStep::Content);
                    content
                }
                Err(e) => {
                    result.steps.push(StepReport::new(
                        CreationStep::Content.as_str(),
                        StepStatus::Warning,
                        format!("Content generation failed, using defaults: {e}"),
                    ));
                    GeneratedContent::fallback(request)
                }
            },
            _ => GeneratedContent::fallback(request),
        };

        step!(
            CreationStep::Files,
            self.deploy_template(name, &content).await,
            "Template deployed".to_string()
        );

        step!(
            CreationStep::Config,
            self.write_site_config(name, request, &content, content_generated)
                .await,
            "Site configuration written".to_string()
        );

        let new_row = NewSubdomain {
            name: name.to_string(),
            full_domain: full_domain.clone(),
            focus: request.focus.clone(),
            lms: request.lms.clone(),
            description: request.description.clone(),
            content_generated,
            database_name: Some(database_name),
            dns_record_id: Some(dns_record_id),
            directory_path: Some(directory.to_string_lossy().into_owned()),
            created_by: caller.remote_addr.clone(),
        };
        let subdomain_id = step!(
            CreationStep::Tracking,
            self.ctx.tracking.insert(new_row).await,
            format!("Subdomain tracked: {name}")
        );

        self.append_creation_logs(subdomain_id, &result, caller).await;

        result.subdomain_id = Some(subdomain_id);
        result.subdomain_url = Some(cfg.subdomain_url(name));
        result
    }

    /// Copy the template tree into the new document root and substitute the
    /// content placeholders in its landing page.
    async fn deploy_template(&self, name: &str, content: &GeneratedContent) -> CoreResult<()> {
        let cfg = &self.ctx.config;
        let directory = cfg.directory_path(name);
        self.ctx
            .filesystem
            .copy_tree(&cfg.template_path, &directory)
            .await?;
        self.ctx
            .filesystem
            .apply_placeholders(
                &directory.join("index.html"),
                &[
                    ("WELCOME_TITLE", content.welcome_title.clone()),
                    ("HERO_TAGLINE", content.hero_tagline.clone()),
                    ("WELCOME_CONTENT", content.welcome_content.clone()),
                ],
            )
            .await?;
        Ok(())
    }

    async fn write_site_config(
        &self,
        name: &str,
        request: &CreationRequest,
        content: &GeneratedContent,
        content_generated: bool,
    ) -> CoreResult<()> {
        let cfg = &self.ctx.config;
        let site_config = SiteConfig {
            subdomain_name: name.to_string(),
            full_domain: cfg.full_domain(name),
            display_name: content.welcome_title.clone(),
            description: request.description.clone().unwrap_or_default(),
            primary_lms: request.lms.clone().unwrap_or_default(),
            theme: content.theme.clone(),
            database_name: cfg.database_name(name),
            created_at: Utc::now(),
            content_generated,
        };
        let payload = serde_json::to_string_pretty(&site_config)
            .map_err(|e| crate::error::CoreError::SerializationError(e.to_string()))?;
        self.ctx
            .filesystem
            .write_file(&cfg.directory_path(name).join("config.json"), &payload)
            .await?;
        Ok(())
    }

    /// Replay the provisioning step reports into the persistent creation log.
    /// Log failures are reported but never fail the (already successful) run.
    async fn append_creation_logs(
        &self,
        subdomain_id: i64,
        result: &CreationResult,
        caller: &RequestContext,
    ) {
        let provisioning = [
            CreationStep::Hosting,
            CreationStep::Dns,
            CreationStep::Database,
            CreationStep::Directory,
        ];
        for report in result
            .steps
            .iter()
            .filter(|r| provisioning.iter().any(|s| s.as_str() == r.name))
        {
            let entry = CreationLogEntry {
                step_name: report.name.clone(),
                status: report.status,
                message: report.message.clone(),
                timestamp: Utc::now(),
                origin: caller.remote_addr.clone(),
            };
            if let Err(e) = self
                .ctx
                .tracking
                .append_creation_log(subdomain_id, entry)
                .await
            {
                log::warn!("Failed to append creation log for {subdomain_id}: {e}");
            }
        }
    }
}
