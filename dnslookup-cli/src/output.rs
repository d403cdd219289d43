use dnslookup::dns::message::DnsMessage;
use dnslookup::dns::resolver::ResolverErrorsAsync;
use std::net::SocketAddr;
use std::process::ExitCode;

/// What one lookup prints on stdout and whether it counts as a success.
#[derive(Debug, PartialEq, Eq)]
pub struct Report {
    pub line: String,
    pub success: bool,
}

impl Report {
    fn failure(line: String) -> Self {
        Report { line, success: false }
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Maps the outcome of a lookup to its stdout line.
///
/// A timeout prints `Timed out.`, any other error prints its message, a response without
/// an A answer prints the no-answer line. Only a found address (or a JSON dump of a
/// decoded response) succeeds.
pub fn report(
    domain: &str,
    result: &Result<DnsMessage, ResolverErrorsAsync>,
    nameserver: SocketAddr,
    json: bool,
) -> Result<Report, serde_json::Error> {
    let response = match result {
        Ok(response) => response,
        Err(e) if e.is_timeout() => return Ok(Report::failure("Timed out.".to_string())),
        Err(e) => return Ok(Report::failure(e.to_string())),
    };

    if json {
        return Ok(Report {
            line: serde_json::to_string_pretty(response)?,
            success: true,
        });
    }

    Ok(match first_ipv4_line(domain, response, nameserver) {
        Some(line) => Report { line, success: true },
        None => Report::failure(no_answer_line(domain)),
    })
}

/// `IPv4 address for <domain>: <addr> (TTL: <ttl>, reported by <nameserver>)` for the
/// first A answer, if there is one.
pub fn first_ipv4_line(domain: &str, response: &DnsMessage, nameserver: SocketAddr) -> Option<String> {
    let (addr, ttl) = response.first_ipv4()?;
    Some(format!(
        "IPv4 address for {domain}: {addr} (TTL: {ttl}, reported by {})",
        nameserver.ip()
    ))
}

pub fn no_answer_line(domain: &str) -> String {
    format!("No IPv4 address found for {domain}.")
}
