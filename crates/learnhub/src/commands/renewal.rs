//! Subscription renewal command handler.

use learnhub_core::ExtensionPreview;

use crate::cli::{GlobalOpts, RenewalArgs, RenewalCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(args: RenewalArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let portal = super::oneshot_portal(global, true).await?;

    match args.command {
        RenewalCommand::Preview { months } => {
            let preview = portal.extension_preview(months)?;
            let out = output::render_single(
                &global.output,
                &preview,
                detail,
                |preview| output::format_instant(preview.new_end),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

fn detail(preview: &ExtensionPreview) -> String {
    [
        format!("current end:  {}", output::format_instant(preview.current_end)),
        format!("remaining:    {}", preview.remaining),
        format!("new end:      {}", output::format_instant(preview.new_end)),
    ]
    .join("\n")
}
