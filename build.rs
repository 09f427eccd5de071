use vergen_gitcl::{Emitter, Gitcl};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // VERGEN_GIT_SHA and VERGEN_GIT_DIRTY feed the User-Agent header sent by
    // the HTTP transport.
    let gitcl = Gitcl::builder().sha(true).dirty(true).build();

    Emitter::default().add_instructions(&gitcl)?.emit()?;

    Ok(())
}
