//! Input event syntax for camera replay
//!
//! - `drag:DX,DY` pointer move with the primary button held
//! - `move:BUTTONS,DX,DY` pointer move with an explicit button mask
//! - `wheel:DY` wheel scroll

use raymesh::InputEvent;
use raymesh::camera::PRIMARY_BUTTON;

/// Parse one event, for use as a clap value parser
pub fn parse_event(s: &str) -> Result<InputEvent, String> {
    let (kind, args) = s
        .split_once(':')
        .ok_or_else(|| format!("'{s}': expected KIND:ARGS"))?;
    let values: Vec<&str> = args.split(',').map(str::trim).collect();

    let float = |v: &str| {
        v.parse::<f32>()
            .map_err(|e| format!("'{s}': invalid number '{v}': {e}"))
    };

    match (kind, values.as_slice()) {
        ("drag", &[dx, dy]) => Ok(InputEvent::PointerMove {
            buttons: PRIMARY_BUTTON,
            dx: float(dx)?,
            dy: float(dy)?,
        }),
        ("move", &[buttons, dx, dy]) => Ok(InputEvent::PointerMove {
            buttons: buttons
                .parse()
                .map_err(|e| format!("'{s}': invalid button mask '{buttons}': {e}"))?,
            dx: float(dx)?,
            dy: float(dy)?,
        }),
        ("wheel", &[dy]) => Ok(InputEvent::Wheel { dy: float(dy)? }),
        ("drag" | "move" | "wheel", _) => Err(format!("'{s}': wrong number of values")),
        _ => Err(format!("'{s}': unknown event kind '{kind}' (use drag, move or wheel)")),
    }
}
