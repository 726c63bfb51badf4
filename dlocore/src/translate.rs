//! End-to-end translation: source or program tree in, axiom records out.
use dloformal::axiom::{AxiomRecord, PlainRecord};
use dloprog::parser::{ParseOutcome, parse};
use dloprog::tree::Program;
use dloprog::utils::Diagnostic;
use log::{debug, info};

use crate::builder::AxiomBuilder;
use crate::flow::normalize;
use crate::utils::conf::TranslateConfig;
use crate::utils::error::{DloError, DloResult};

/// Result of translating program source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub program: Program,
    pub records: Vec<AxiomRecord>,
    /// Lexical errors skipped while reading the source.
    pub skipped: Vec<Diagnostic>,
}

impl Translation {
    /// Structured string form of every record, in order.
    pub fn to_plain(&self) -> Vec<PlainRecord> {
        self.records.iter().flat_map(AxiomRecord::to_plain).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslateConfig,
}

impl Translator {
    pub fn new(config: TranslateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslateConfig {
        &self.config
    }

    /// Translate a program tree into its axiom records.
    pub fn translate(&self, program: &Program) -> DloResult<Vec<AxiomRecord>> {
        let flow = normalize(&program.root);
        if self.config.dump_flow {
            debug!("Flow chain:\n{flow}");
        }

        let records = AxiomBuilder::new(&program.universe).build(Some(&flow))?;

        if self.config.check_frames {
            for (position, record) in records.iter().enumerate() {
                record
                    .check_frame(&program.universe)
                    .map_err(|source| DloError::FrameViolation {
                        record: position + 1,
                        source,
                    })?;
            }
        }

        info!(
            "Translated program over {} variable(s) into {} record(s)",
            program.universe.len(),
            records.len()
        );
        Ok(records)
    }

    /// Parse `src` and translate the resulting program.
    pub fn translate_source(&self, src: &str) -> DloResult<Translation> {
        let ParseOutcome { program, skipped } = parse(src)?;
        let records = self.translate(&program)?;
        Ok(Translation {
            program,
            records,
            skipped,
        })
    }
}

/// Translate with the default configuration.
pub fn translate(program: &Program) -> DloResult<Vec<AxiomRecord>> {
    Translator::default().translate(program)
}
