use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("The {{{{content}}}} placeholder is missing from the prompt template. Add it so the post content is sent to the provider.")]
    MissingContentPlaceholder,
}
