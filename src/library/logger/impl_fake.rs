use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

/// Collects log lines in memory. Child loggers share the parent's buffer.
#[derive(Debug, Clone, Default)]
pub struct LoggerFake {
    namespace: Option<String>,
    lines: Arc<Mutex<Vec<String>>>,
}

impl LoggerFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn push(&self, level: &str, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let line = match &self.namespace {
            Some(namespace) => format!("{} {}: {}", level, namespace, message),
            None => format!("{} {}", level, message),
        };
        self.lines
            .lock()
            .map_err(|_| "logger buffer poisoned")?
            .push(line);
        Ok(())
    }
}

impl Logger for LoggerFake {
    fn info(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push("INFO", message)
    }

    fn error(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push("ERROR", message)
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerFake {
            namespace: Some(new_namespace),
            lines: self.lines.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_are_nested_and_share_buffer() {
        let logger = LoggerFake::new();
        let child = logger.with_namespace("video").with_namespace("opencv");

        child.info("opened").unwrap();
        logger.error("boom").unwrap();

        assert_eq!(
            logger.lines(),
            vec![
                "INFO video:opencv: opened".to_string(),
                "ERROR boom".to_string()
            ]
        );
    }
}
