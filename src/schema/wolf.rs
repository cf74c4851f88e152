//! WolfLauncher orchestration configuration.
//!
//! A single `<archive>` named after the definition wraps one `<command>` per
//! definition reference. Each command runs the embedded GetThis against the
//! selector configuration of the referenced definition, which is addressed as
//! an embedded resource (`res:#<Name>_config.xml`), and declares two outputs:
//! the collected archive and the command log.

use super::{EmitSettings, XmlBuilder};
use crate::defaults::CONFIG_SUFFIX;
use crate::definition::Definition;
use crate::error::Result;

/// Argument passed to GetThis for the selector configuration `target`.
pub fn getthis_argument(target: &str) -> String {
    format!("/config=res:#{}{} /NoLimits", target, CONFIG_SUFFIX)
}

/// Render an orchestrator definition. Filesystem references are skipped; an
/// orchestrator must be split before it reaches this point.
pub fn render(definition: &Definition, settings: &EmitSettings) -> Result<String> {
    let mut xml = XmlBuilder::new();
    let root = xml.element("wolf");
    xml.attr(root, "childdebug", "true");
    xml.attr(root, "command_timeout", &settings.command_timeout);

    xml.text_child(root, "log", &settings.log_name)?;
    let outline = xml.text_child(root, "outline", &settings.outline_name)?;
    xml.attr(outline, "disposition", "truncate");

    let archive = xml.child(root, "archive")?;
    xml.attr(archive, "name", &format!("{}.7z", definition.name));
    xml.attr(archive, "keyword", &definition.name);
    xml.attr(archive, "concurrency", &settings.concurrency);
    xml.attr(archive, "repeat", &settings.repeat);
    xml.attr(archive, "compression", &settings.compression);

    for reference in &definition.references {
        let Some(target) = reference.target.definition_name() else {
            continue;
        };

        let command = xml.child(archive, "command")?;
        xml.attr(command, "keyword", &reference.name);

        let execute = xml.child(command, "execute")?;
        xml.attr(execute, "name", "Orc.exe");
        xml.attr(execute, "run", "self:#GetThis");

        xml.text_child(command, "argument", &getthis_argument(target))?;

        let archive_out = xml.child(command, "output")?;
        xml.attr(archive_out, "name", &format!("{}.7z", reference.name));
        xml.attr(archive_out, "source", "File");
        xml.attr(archive_out, "argument", "/out={FileName}");

        let log_out = xml.child(command, "output")?;
        xml.attr(log_out, "name", &format!("{}.log", reference.name));
        xml.attr(log_out, "source", "StdOutErr");
    }

    xml.finish(root)
}
