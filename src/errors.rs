error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
        Clap(::clap::Error);
    }

    errors {
        InvalidParameter(name: String, reason: String) {
            description("Invalid parameter.")
            display("Invalid value for '{}': {}", name, reason)
        }
        UnknownPreset(name: String) {
            description("Unknown scene preset.")
            display("Unknown scene preset '{}'", name)
        }
        RenderContext(msg: String) {
            description("Could not create a render context.")
            display("Could not create a render context: {}", msg)
        }
        EmptyScene {
            description("Nothing to render.")
            display("The scene contains no geometry to render.")
        }
    }
}
