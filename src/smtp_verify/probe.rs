use super::error::ProbeError;
use super::options::ProbeOptions;
use super::session::SmtpSession;
use super::types::{ProbeOutcome, ProbeStage, SmtpReply};

/// Runs a minimal SMTP dialogue against `mx_host` to test whether `email`
/// is accepted as a recipient. The connection is closed before `DATA`.
///
/// Sequence: banner (`220` expected), `EHLO` (falling back to `HELO`),
/// `MAIL FROM`, `RCPT TO`. `MAIL FROM` and `RCPT TO` each count as one
/// verification operation. The reply to `RCPT TO` is returned verbatim; the
/// probe never retries.
pub fn probe(email: &str, mx_host: &str, options: &ProbeOptions) -> ProbeOutcome {
    let mut ver_ops = 0;
    let result = run_dialogue(email, mx_host, options, &mut ver_ops);
    match &result {
        Ok(reply) => {
            tracing::debug!(
                %email,
                mx = %mx_host,
                code = reply.code,
                transient = reply.is_transient_failure(),
                ver_ops,
                "RCPT TO answered"
            );
        }
        Err(err) => {
            tracing::warn!(%email, mx = %mx_host, kind = ?err.kind(), ver_ops, "probe failed: {err}");
        }
    }
    ProbeOutcome { ver_ops, result }
}

fn run_dialogue(
    email: &str,
    mx_host: &str,
    options: &ProbeOptions,
    ver_ops: &mut u32,
) -> Result<SmtpReply, ProbeError> {
    let mut session = SmtpSession::connect(mx_host, options.port, options.timeout())?;

    let banner = session.read_greeting()?;
    if banner.code != 220 {
        return Err(ProbeError::Greeting {
            host: mx_host.to_string(),
            reply: banner,
        });
    }

    let helo = options.helo_name();
    let ehlo = session.command(&format!("EHLO {helo}"), ProbeStage::Ehlo)?;
    if !ehlo.is_positive_completion() {
        session.command(&format!("HELO {helo}"), ProbeStage::Helo)?;
    }

    let envelope = format!("MAIL FROM:<{}>", options.envelope_sender());
    session.command(&envelope, ProbeStage::MailFrom)?;
    *ver_ops += 1;

    let rcpt = session.command(&format!("RCPT TO:<{email}>"), ProbeStage::RcptTo)?;
    *ver_ops += 1;

    Ok(rcpt)
}
